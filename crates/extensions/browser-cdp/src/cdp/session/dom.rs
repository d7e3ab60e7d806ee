//! DOM operations for CDP page session.
//!
//! Elements are addressed by CSS selector and manipulated through the page's
//! own DOM API, so hidden or off-screen controls behave the same as visible
//! ones. Every operation targets the first match and is a no-op when nothing
//! matches.

use crate::cdp::error::CdpError;

use super::core::PageSession;

/// JavaScript expressions for selector-based DOM access.
pub(crate) mod scripts {
    use serde_json::Value;

    fn literal(value: &str) -> String {
        Value::String(value.to_string()).to_string()
    }

    pub(crate) fn count(selector: &str) -> String {
        format!("document.querySelectorAll({}).length", literal(selector))
    }

    pub(crate) fn text(selector: &str) -> String {
        format!(
            "(() => {{ const el = document.querySelector({}); return el ? el.textContent : null; }})()",
            literal(selector)
        )
    }

    /// Property value when the element exposes a string property of that
    /// name (e.g. a resolved `href`), the raw attribute otherwise.
    pub(crate) fn property(selector: &str, name: &str) -> String {
        format!(
            "(() => {{ const el = document.querySelector({sel}); if (!el) return null; \
             const v = el[{name}]; return typeof v === 'string' ? v : el.getAttribute({name}); }})()",
            sel = literal(selector),
            name = literal(name)
        )
    }

    pub(crate) fn set_value(selector: &str, value: &str) -> String {
        format!(
            "(() => {{ const el = document.querySelectorAll({sel})[0]; if (!el) return false; \
             el.value = {value}; \
             el.dispatchEvent(new Event('input', {{ bubbles: true }})); \
             el.dispatchEvent(new Event('change', {{ bubbles: true }})); return true; }})()",
            sel = literal(selector),
            value = literal(value)
        )
    }

    pub(crate) fn click(selector: &str) -> String {
        format!(
            "(() => {{ const el = document.querySelectorAll({}); if (el.length === 0) return false; \
             el[0].click(); return true; }})()",
            literal(selector)
        )
    }
}

impl PageSession {
    /// Number of elements matching `selector`.
    pub async fn count_matches(&self, selector: &str) -> Result<u64, CdpError> {
        let result = self.evaluate(&scripts::count(selector)).await?;
        Ok(result.as_u64().unwrap_or(0))
    }

    /// Text content of the first match.
    pub async fn text_of(&self, selector: &str) -> Result<Option<String>, CdpError> {
        let result = self.evaluate(&scripts::text(selector)).await?;
        Ok(result.as_str().map(|s| s.to_string()))
    }

    /// Property (falling back to attribute) of the first match.
    pub async fn property_of(&self, selector: &str, name: &str) -> Result<Option<String>, CdpError> {
        let result = self.evaluate(&scripts::property(selector, name)).await?;
        Ok(result.as_str().map(|s| s.to_string()))
    }

    /// Set the value of the first match. Returns whether anything matched.
    pub async fn set_value(&self, selector: &str, value: &str) -> Result<bool, CdpError> {
        let result = self.evaluate(&scripts::set_value(selector, value)).await?;
        Ok(result.as_bool().unwrap_or(false))
    }

    /// Click the first match. Returns whether anything matched.
    pub async fn click_first(&self, selector: &str) -> Result<bool, CdpError> {
        let result = self.evaluate(&scripts::click(selector)).await?;
        Ok(result.as_bool().unwrap_or(false))
    }
}
