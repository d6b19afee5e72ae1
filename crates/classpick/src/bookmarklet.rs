//! `javascript:` URIs that load a published `classpick-web` bundle and start
//! a standalone session in the current page.

use thiserror::Error;
use url::Url;

/// Global the bookmarklet sets once the bundle has been initialised, so a
/// second click reuses it instead of loading the glue again.
pub const READY_FLAG: &str = "__classpickReady";

#[derive(Debug, Error)]
pub enum BookmarkletError {
    #[error("Invalid base URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("Base URL must be http or https, got {0}")]
    UnsupportedScheme(String),
    #[error("Failed to encode bookmarklet: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Where the glue script and the wasm module are published.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleLocation {
    pub glue: Url,
    pub wasm: Url,
}

impl BundleLocation {
    pub fn new(base_url: &str, bundle_name: &str) -> Result<Self, BookmarkletError> {
        let mut base = Url::parse(base_url)?;
        if base.scheme() != "http" && base.scheme() != "https" {
            return Err(BookmarkletError::UnsupportedScheme(base.scheme().to_string()));
        }
        // `join` replaces the last segment unless the path is a directory.
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        Ok(Self {
            glue: base.join(&format!("{}.js", bundle_name))?,
            wasm: base.join(&format!("{}_bg.wasm", bundle_name))?,
        })
    }
}

pub fn bookmarklet(location: &BundleLocation) -> Result<String, BookmarkletError> {
    let glue = serde_json::to_string(location.glue.as_str())?;
    let wasm = serde_json::to_string(location.wasm.as_str())?;
    let script = format!(
        "(()=>{{\
if(window.{flag}){{wasm_bindgen.runStandalone();return;}}\
const s=document.createElement(\"script\");\
s.src={glue};\
s.onload=()=>wasm_bindgen({{module_or_path:{wasm}}}).then(()=>{{window.{flag}=true;wasm_bindgen.runStandalone();}});\
document.head.appendChild(s);\
}})();",
        flag = READY_FLAG,
    );
    // Browsers percent-decode the URI before running it.
    Ok(format!("javascript:{}", script.replace('%', "%25")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_without_trailing_slash_is_a_directory() {
        let location = BundleLocation::new("https://cdn.example.com/classpick", "classpick_web").unwrap();
        assert_eq!(
            location.glue.as_str(),
            "https://cdn.example.com/classpick/classpick_web.js"
        );
        assert_eq!(
            location.wasm.as_str(),
            "https://cdn.example.com/classpick/classpick_web_bg.wasm"
        );
    }

    #[test]
    fn percent_signs_survive_decoding() {
        let location = BundleLocation::new("https://cdn.example.com/a%20b/", "classpick_web").unwrap();
        let uri = bookmarklet(&location).unwrap();
        assert!(uri.contains("a%2520b"));
    }
}
