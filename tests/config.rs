#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::fs;
    use std::path::PathBuf;

    use modflow_kit::{Model, ModflowError, RunConfig, Version};
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = RunConfig::default();
        assert_eq!(config.exe_for(Version::Mf2005), Version::Mf2005.default_exe());
        assert_eq!(config.workspace(), PathBuf::from("."));
        assert!(!config.silent);
    }

    #[test]
    fn test_toml() {
        let tmp = TempDir::new().expect("tempdir");
        let path = tmp.path().join("modflow.toml");
        fs::write(
            &path,
            "mfnwt = \"/opt/modflow/mfnwt\"\nworkspace = \"runs\"\nsilent = true\n",
        )
        .expect("write");

        let config = RunConfig::load(&path).expect("config");
        assert_eq!(config.exe_for(Version::MfNwt), PathBuf::from("/opt/modflow/mfnwt"));
        assert_eq!(config.exe_for(Version::Mf2005), Version::Mf2005.default_exe());
        assert_eq!(config.workspace(), PathBuf::from("runs"));
        assert!(config.silent);

        assert!(matches!(
            RunConfig::from_toml_str("mf6 = \"mf6\""),
            Err(ModflowError::ConfigFile(_))
        ));
    }

    #[test]
    fn test_environment_overrides() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("MODFLOW_MF2005", "/usr/local/bin/mf2005"),
            ("MODFLOW_NWT", ""),
            ("MODFLOW_WORKSPACE", "/tmp/models"),
        ]);
        let config = RunConfig::from_toml_str("mfnwt = \"mfnwt-1.3\"\nworkspace = \"runs\"")
            .expect("config")
            .with_env(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.exe_for(Version::Mf2005), PathBuf::from("/usr/local/bin/mf2005"));
        // empty values do not override
        assert_eq!(config.exe_for(Version::MfNwt), PathBuf::from("mfnwt-1.3"));
        assert_eq!(config.workspace(), PathBuf::from("/tmp/models"));

        let model = Model::with_config("gw", Version::Mf2005, &config);
        assert_eq!(model.exe(), PathBuf::from("/usr/local/bin/mf2005").as_path());
        assert_eq!(model.name_file(), PathBuf::from("/tmp/models/gw.nam"));
    }
}
