use crate::config::CONFIG_FILE_NAME;
use crate::io;
use anyhow::Result;
use std::path::{Path, PathBuf};

const DEFAULT_CONFIG: &str = r#"# claimguard configuration

[thresholds]
# Claims on one VIN before it is flagged
vin_threshold = 2
# Standard deviations above the mean for a high-dollar claim
dollar_threshold = 2.0
# Window in days for repeat claims on one VIN
days_threshold = 30
# Claims through one dealer before it is flagged on volume
dealer_count_threshold = 3
# Multiple of the portfolio mean a dealer's average claim must reach
dealer_amount_multiplier = 1.5

[output]
default_format = "terminal"
delimiter = ","
plain = false

[engine]
parallel = false
"#;

pub fn init_config(force: bool) -> Result<()> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);
    write_default_config(&config_path, force)?;
    println!("Created {CONFIG_FILE_NAME} configuration file");
    Ok(())
}

pub fn write_default_config(config_path: &Path, force: bool) -> Result<()> {
    if config_path.exists() && !force {
        anyhow::bail!("Configuration file already exists. Use --force to overwrite.");
    }
    io::write_file(config_path, DEFAULT_CONFIG)
}
