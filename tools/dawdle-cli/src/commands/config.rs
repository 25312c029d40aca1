//! Show and check the effective configuration.

use dawdle_common::config::{config_file_path, AppConfig};

pub fn run(config: &AppConfig, save: bool) -> anyhow::Result<()> {
    println!("Dawdle Configuration");
    println!("{}", "=".repeat(50));
    println!("  Config file: {}", config_file_path().display());
    println!();

    let a = &config.analysis;
    println!("  emotional_distance   {:.2}", a.emotional_distance);
    println!("  emotional_velocity   {:.2}", a.emotional_velocity);
    println!("  action_delay_ms      {}", a.action_delay_ms);
    println!("  debounce_window_ms   {}", a.debounce_window_ms);
    println!();
    println!(
        "  history              {} ({})",
        if config.history.enabled { "on" } else { "off" },
        config.history.path.display()
    );
    println!("  log level            {}", config.logging.level);
    println!();

    match a.validate() {
        Ok(()) => println!("[OK] Thresholds are consistent"),
        Err(e) => {
            println!("[FAIL] {e}");
            anyhow::bail!("Invalid configuration");
        }
    }

    if save {
        config.save()?;
        println!("[OK] Saved to {}", config_file_path().display());
    }

    Ok(())
}
