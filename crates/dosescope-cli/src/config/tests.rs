#[cfg(test)]
mod tests {
    use super::super::*;

    #[test]
    fn test_empty_file_gives_defaults() {
        let config = Config::from_toml_str("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.paths.data_dir, PathBuf::from("data"));
        assert_eq!(config.sources.timeout_secs, 30);
        assert_eq!(config.server.port, 8050);
    }

    #[test]
    fn test_partial_sections_keep_other_defaults() {
        let config = Config::from_toml_str(
            r#"
            [paths]
            data_dir = "/srv/dosescope/data"

            [sources]
            extra_allowed_domains = ["mirror.example.org"]

            [server]
            port = 9000
            "#,
        )
        .unwrap();

        assert_eq!(config.paths.data_dir, PathBuf::from("/srv/dosescope/data"));
        assert_eq!(config.paths.drug_info_dir, PathBuf::from("drug_info"));
        assert_eq!(config.sources.extra_allowed_domains, vec!["mirror.example.org"]);
        assert_eq!(config.sources.chembl_base_url, "https://www.ebi.ac.uk/chembl/api/data");
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 9000);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        assert!(Config::from_toml_str("[server]\nport = \"eighty\"").is_err());
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(Some(&dir.path().join("absent.toml"))).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dosescope.toml");
        std::fs::write(&path, "[server]\nhost = \"0.0.0.0\"\n").unwrap();
        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
    }

    #[test]
    fn test_cli_overrides_and_socket_addr() {
        let config = Config::default().with_server_overrides(Some("0.0.0.0".to_string()), Some(8080));
        assert_eq!(config.server.socket_addr().unwrap().to_string(), "0.0.0.0:8080");

        let bad = Config::default().with_server_overrides(Some("not a host".to_string()), None);
        assert!(bad.server.socket_addr().is_err());
    }
}
