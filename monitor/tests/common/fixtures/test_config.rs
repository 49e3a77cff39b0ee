//! Test configuration builder for creating test configs programmatically

use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Builder for creating test configurations
pub struct TestConfigBuilder {
    temp_dir: TempDir,
    main_config: MainConfigBuilder,
    environments: Vec<EnvironmentConfigBuilder>,
}

impl TestConfigBuilder {
    /// Create a new test config builder
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        Self {
            temp_dir,
            main_config: MainConfigBuilder::default(),
            environments: Vec::new(),
        }
    }

    /// Configure main settings
    pub fn with_main_config<F>(mut self, f: F) -> Self
    where
        F: FnOnce(MainConfigBuilder) -> MainConfigBuilder,
    {
        self.main_config = f(self.main_config);
        self
    }

    /// Add an environment file
    pub fn with_environment<F>(mut self, name: &str, f: F) -> Self
    where
        F: FnOnce(EnvironmentConfigBuilder) -> EnvironmentConfigBuilder,
    {
        self.environments
            .push(f(EnvironmentConfigBuilder::new(name)));
        self
    }

    /// Build and write config files to temp directory
    pub fn build(self) -> TestConfig {
        let config_dir = self.temp_dir.path().join("config");
        fs::create_dir_all(&config_dir).expect("Failed to create config dir");

        fs::write(config_dir.join("main.toml"), self.main_config.to_toml())
            .expect("Failed to write main.toml");

        for environment in &self.environments {
            fs::write(
                config_dir.join(format!("{}.toml", environment.name)),
                environment.to_toml(),
            )
            .expect("Failed to write environment config");
        }

        TestConfig {
            _temp_dir: self.temp_dir,
            config_dir,
        }
    }
}

impl Default for TestConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Main configuration builder
#[derive(Clone)]
pub struct MainConfigBuilder {
    dialect: String,
    check_interval_seconds: u64,
    request_timeout_seconds: u64,
    max_concurrent_polls: usize,
    check_block_height: bool,
    check_version: bool,
}

impl MainConfigBuilder {
    pub fn dialect(mut self, dialect: &str) -> Self {
        self.dialect = dialect.to_string();
        self
    }

    pub fn check_interval(mut self, seconds: u64) -> Self {
        self.check_interval_seconds = seconds;
        self
    }

    pub fn request_timeout(mut self, seconds: u64) -> Self {
        self.request_timeout_seconds = seconds;
        self
    }

    pub fn max_concurrent_polls(mut self, polls: usize) -> Self {
        self.max_concurrent_polls = polls;
        self
    }

    pub fn check_version(mut self, enabled: bool) -> Self {
        self.check_version = enabled;
        self
    }

    pub fn check_block_height(mut self, enabled: bool) -> Self {
        self.check_block_height = enabled;
        self
    }

    fn to_toml(&self) -> String {
        format!(
            r#"
dialect = "{}"
check_interval_seconds = {}
request_timeout_seconds = {}
max_concurrent_polls = {}
check_block_height = {}
check_version = {}
"#,
            self.dialect,
            self.check_interval_seconds,
            self.request_timeout_seconds,
            self.max_concurrent_polls,
            self.check_block_height,
            self.check_version
        )
    }
}

impl Default for MainConfigBuilder {
    fn default() -> Self {
        Self {
            dialect: "generic".to_string(),
            check_interval_seconds: 300,
            request_timeout_seconds: 10,
            max_concurrent_polls: 4,
            check_block_height: true,
            check_version: true,
        }
    }
}

/// Environment configuration builder
pub struct EnvironmentConfigBuilder {
    name: String,
    base_hosts: Vec<(String, String)>,
    peer_nodes: Vec<(String, String, u16)>,
    raw_peer_nodes: Vec<String>,
    nodes_to_monitor: Vec<(String, String, u16)>,
}

impl EnvironmentConfigBuilder {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            base_hosts: Vec::new(),
            peer_nodes: Vec::new(),
            raw_peer_nodes: Vec::new(),
            nodes_to_monitor: Vec::new(),
        }
    }

    pub fn base_host(mut self, name: &str, host: &str) -> Self {
        self.base_hosts.push((name.to_string(), host.to_string()));
        self
    }

    pub fn peer_node(mut self, name: &str, ip: &str, port: u16) -> Self {
        self.peer_nodes
            .push((name.to_string(), ip.to_string(), port));
        self
    }

    /// Peer table written verbatim, for entries the typed helper cannot express
    pub fn raw_peer_node(mut self, body: &str) -> Self {
        self.raw_peer_nodes.push(body.to_string());
        self
    }

    pub fn node_to_monitor(mut self, name: &str, host: &str, port: u16) -> Self {
        self.nodes_to_monitor
            .push((name.to_string(), host.to_string(), port));
        self
    }

    fn to_toml(&self) -> String {
        // Empty arrays keep the required keys present when a group has no entries
        let mut toml = String::new();
        if self.base_hosts.is_empty() {
            toml.push_str("base_hosts = []\n");
        }
        if self.peer_nodes.is_empty() && self.raw_peer_nodes.is_empty() {
            toml.push_str("peer_nodes = []\n");
        }

        for (name, host) in &self.base_hosts {
            toml.push_str(&format!(
                "\n[[base_hosts]]\nname = \"{}\"\nhost = \"{}\"\n",
                name, host
            ));
        }
        for (name, ip, port) in &self.peer_nodes {
            toml.push_str(&format!(
                "\n[[peer_nodes]]\nname = \"{}\"\nip = \"{}\"\nport = {}\n",
                name, ip, port
            ));
        }
        for body in &self.raw_peer_nodes {
            toml.push_str(&format!("\n[[peer_nodes]]\n{}\n", body));
        }
        for (name, host, port) in &self.nodes_to_monitor {
            toml.push_str(&format!(
                "\n[[nodes_to_monitor]]\nname = \"{}\"\nhost = \"{}\"\nport = {}\n",
                name, host, port
            ));
        }

        toml
    }
}

/// Built test configuration with temp directory
pub struct TestConfig {
    _temp_dir: TempDir,
    pub config_dir: PathBuf,
}

impl TestConfig {
    /// Config directory as the string `ConfigManager::new` expects
    pub fn config_dir(&self) -> String {
        self.config_dir.display().to_string()
    }
}
