use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BannerPayload {
    pub text: String,
    pub picture: Option<String>, // Poster URL shown above the text, if any
}
