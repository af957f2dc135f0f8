use envconfig::Envconfig;

#[derive(Envconfig, Clone, Debug)]
pub struct StatusConfig {
    #[envconfig(from = "RELSTAT_NAMESPACE", default = "default")]
    pub namespace: String,

    /// Label selector narrowing the dependency graph to one release.
    /// Env: RELSTAT_RELEASE_SELECTOR (comma-separated key=value pairs)
    #[envconfig(from = "RELSTAT_RELEASE_SELECTOR", default = "")]
    pub release_selector: String,

    #[envconfig(from = "RELSTAT_LOG_FILTER", default = "info")]
    pub log_filter: String,
}
