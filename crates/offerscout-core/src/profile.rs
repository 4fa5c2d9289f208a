//! Fixed request metadata the origin expects from its own web client.
//!
//! Every header value, path fragment and correlation constant the pipeline
//! sends lives here instead of in the request builders, so a redeploy on the
//! origin side (new bundle hash, new platform version) is a config change.

pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/138.0.0.0 Safari/537.36";

pub const DEFAULT_SEC_CH_UA: &str =
    r#""Not)A;Brand";v="8", "Chromium";v="138", "Google Chrome";v="138""#;

/// Build-hashed filename of the bundle carrying the operation hash table.
///
/// There is no discovery path for this name: it changes whenever the origin
/// redeploys the bundle and must then be overridden via
/// `OFFERSCOUT_SELLERS_PANEL_BUNDLE`.
pub const DEFAULT_SELLERS_PANEL_BUNDLE: &str =
    "static/chunks/marketplace_all-sellers-panel.f4a5450545d8ccfb.js";

pub const DEFAULT_OPERATION_NAME: &str = "GetAllSellerOffers";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteProfile {
    pub user_agent: String,
    pub page_accept_language: String,
    pub sec_ch_ua: String,
    pub sec_ch_ua_platform: String,

    /// Path segment (without leading slash) under which client assets live.
    pub static_assets_segment: String,
    /// Filename prefix of the seller-info chunk referenced by the product page.
    pub seller_info_chunk_prefix: String,
    /// Path of the sellers panel bundle relative to `static_assets_segment`.
    pub sellers_panel_bundle: String,

    pub operation_name: String,
    pub api_path: String,
    /// Origin for the offers API. `None` means the product page origin.
    pub api_origin: Option<String>,

    pub correlation_id: String,
    pub platform_version: String,
    pub business_unit: String,
    pub mart: String,
    pub platform: String,
    pub segment: String,

    pub traffic_type: String,
    pub device_type: String,
    pub render_scope: String,
    pub web_request_source: String,
    pub page_name: String,

    pub condition_codes: Vec<u32>,
    pub offers_source: String,
    pub subscription_eligible: bool,
}

impl Default for SiteProfile {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            page_accept_language: "en-US,en;q=0.9".to_string(),
            sec_ch_ua: DEFAULT_SEC_CH_UA.to_string(),
            sec_ch_ua_platform: r#""Windows""#.to_string(),
            static_assets_segment: "_next/".to_string(),
            seller_info_chunk_prefix: "marketplace_product-seller-info_product-seller-info-"
                .to_string(),
            sellers_panel_bundle: DEFAULT_SELLERS_PANEL_BUNDLE.to_string(),
            operation_name: DEFAULT_OPERATION_NAME.to_string(),
            api_path: "orchestra/home/graphql".to_string(),
            api_origin: None,
            correlation_id: "EM0F5CQkMfg6w9Ral2ECqd05NaVpa-hzAaoh".to_string(),
            platform_version: "usweb-1.212.0-3d45d91d0379181242084b528eb8317750d32b99-7102008r"
                .to_string(),
            business_unit: "WALMART-US".to_string(),
            mart: "B2C".to_string(),
            platform: "rweb".to_string(),
            segment: "oaoh".to_string(),
            traffic_type: "customer".to_string(),
            device_type: "desktop".to_string(),
            render_scope: "SSR".to_string(),
            web_request_source: "Browser".to_string(),
            page_name: "itemPage".to_string(),
            condition_codes: vec![1],
            offers_source: "MORE_SELLER_OPTIONS".to_string(),
            subscription_eligible: true,
        }
    }
}
