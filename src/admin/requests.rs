use serde::Deserialize;

#[derive(Deserialize)]
pub struct AddPediatricianRequest {
    #[serde(default)]
    pub name: String,
    pub genre: Option<String>,
}
