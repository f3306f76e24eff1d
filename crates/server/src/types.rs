use serde::Deserialize;

#[derive(Debug, Deserialize, Default)]
pub struct DebugParams {
    pub debug: Option<String>,
}
