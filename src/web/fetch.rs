use crate::loaders::{AssetSource, LoadError};
use futures::future::{FutureExt, LocalBoxFuture};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::Response;

/// Plain HTTP GET through `window.fetch`, relative to a base url.
#[derive(Debug, Clone, Default)]
pub struct FetchSource {
    base: String,
}

impl FetchSource {
    /// Resolve urls against `base` (may be empty).
    pub fn new(base: impl Into<String>) -> Self {
        Self { base: base.into() }
    }

    async fn get(&self, url: String) -> Result<Vec<u8>, LoadError> {
        let failed = |reason: String| LoadError::Fetch {
            url: url.clone(),
            reason,
        };
        let window = web_sys::window().ok_or_else(|| failed("no window".into()))?;
        let full = format!("{}{}", self.base, url);

        let response = JsFuture::from(window.fetch_with_str(&full))
            .await
            .map_err(|e| failed(format!("{:?}", e)))?;
        let response: Response = response
            .dyn_into()
            .map_err(|_| failed("not a Response".into()))?;

        if response.status() == 404 {
            return Err(LoadError::NotFound(url.clone()));
        }
        if !response.ok() {
            return Err(failed(format!("HTTP {}", response.status())));
        }

        let buffer = response.array_buffer().map_err(|e| failed(format!("{:?}", e)))?;
        let buffer = JsFuture::from(buffer)
            .await
            .map_err(|e| failed(format!("{:?}", e)))?;
        Ok(js_sys::Uint8Array::new(&buffer).to_vec())
    }
}

impl AssetSource for FetchSource {
    fn fetch(&self, url: &str) -> LocalBoxFuture<'_, Result<Vec<u8>, LoadError>> {
        self.get(url.to_string()).boxed_local()
    }
}
