use lazy_static::lazy_static;
use roimark_domain::{result::trace_ok_err, to_rm, RmResult};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::info;

lazy_static! {
    pub static ref DEFAULT_HOMEDIR: PathBuf = match dirs::home_dir() {
        Some(home_dir) => home_dir,
        None => std::env::temp_dir(),
    };
}

pub const CFG_FILENAME: &str = "rm_cfg.toml";

const CFG_DEFAULT: &str = r#"
    min_canvas_width = 600.0
    max_canvas_width = 800.0
    "#;

/// Display tuning. The defaults match what the downstream operators are
/// used to, the file is only there for unusual screen setups.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq)]
pub struct Cfg {
    pub min_canvas_width: f64,
    pub max_canvas_width: f64,
}
impl Default for Cfg {
    fn default() -> Self {
        get_default_cfg()
    }
}

pub fn get_default_cfg() -> Cfg {
    toml::from_str(CFG_DEFAULT).expect("default config broken")
}

pub fn get_roimark_folder(home_folder: &Path) -> PathBuf {
    home_folder.join(".roimark")
}
pub fn get_cfg_path(home_folder: &Path) -> PathBuf {
    get_roimark_folder(home_folder).join(CFG_FILENAME)
}
pub fn get_log_folder(home_folder: &Path) -> PathBuf {
    get_roimark_folder(home_folder).join("logs")
}

pub fn read_cfg(home_folder: &Path) -> RmResult<Cfg> {
    let cfg_path = get_cfg_path(home_folder);
    if cfg_path.exists() {
        let cfg_str = fs::read_to_string(&cfg_path).map_err(to_rm)?;
        toml::from_str(&cfg_str).map_err(to_rm)
    } else {
        info!("no config file at {cfg_path:?}, using defaults");
        Ok(get_default_cfg())
    }
}

/// config from the user's home folder, defaults on any failure
pub fn get_cfg() -> Cfg {
    trace_ok_err(read_cfg(&DEFAULT_HOMEDIR)).unwrap_or_else(get_default_cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_cfg() {
        let cfg = get_default_cfg();
        assert_eq!(cfg.min_canvas_width, 600.0);
        assert_eq!(cfg.max_canvas_width, 800.0);
        assert_eq!(cfg, Cfg::default());
    }

    #[test]
    fn test_read_cfg_missing_file() {
        let cfg = read_cfg(Path::new("surely/not/a/home/folder")).unwrap();
        assert_eq!(cfg, get_default_cfg());
    }
}
