use directories::ProjectDirs;
use std::path::PathBuf;
pub mod keys;

pub fn config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "quarterdeck").map(|proj_dirs| {
        let config_dir = proj_dirs.config_dir();
        config_dir.join("config.toml")
    })
}

pub mod matching {
    pub fn case_insensitive() -> bool {
        true
    }
}

pub mod completion {
    pub fn max_suggestions() -> usize {
        32
    }
}

pub mod permissions {
    pub fn administrator() -> bool {
        false
    }

    pub fn granted() -> Vec<String> {
        vec!["console.math".to_string()]
    }
}
