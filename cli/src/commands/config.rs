use crate::app_config::AppConfig;

pub fn config_cmd(config: &AppConfig) -> anyhow::Result<()> {
    let rendered = toml::to_string(config)?;
    print!("{rendered}");

    Ok(())
}
