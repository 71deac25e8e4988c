//! Domain-level command and query types
//! These structs are used by services inside the domain layer and are **not**
//! exposed over the public API. The REST layer is responsible for mapping the
//! public DTOs defined in the `shared` crate to these internal types.

pub mod share {
    use shared::{BiodataData, TemplateCustomization};

    /// Input for publishing a share link.
    #[derive(Debug, Clone)]
    pub struct CreateShareCommand {
        pub data: BiodataData,
        pub customization: TemplateCustomization,
        /// 24 (one day) or 168 (one week); anything else is rejected
        pub expiry_hours: u32,
    }

    /// Result of publishing a share link.
    #[derive(Debug, Clone)]
    pub struct CreateShareResult {
        pub share_id: String,
        pub share_url: String,
        pub qr_code_url: String,
    }

    /// A resolved share plus whether this resolution was its first view.
    #[derive(Debug, Clone)]
    pub struct ResolveShareResult {
        pub share: shared::SharedBiodata,
        pub first_view: bool,
    }
}

pub mod saved_templates {
    use shared::{BiodataData, TemplateCustomization, TemplateId};

    /// Input for saving the current record as a named template.
    #[derive(Debug, Clone)]
    pub struct SaveTemplateCommand {
        pub session_id: String,
        pub template_name: String,
        pub biodata_data: BiodataData,
        pub template_id: TemplateId,
        pub customization: TemplateCustomization,
    }

    /// Partial update of a saved template's mutable fields.
    #[derive(Debug, Clone, Default)]
    pub struct UpdateSavedTemplateCommand {
        pub template_name: Option<String>,
        pub is_favorite: Option<bool>,
    }
}

pub mod ai {
    use shared::AiUsageResponse;

    /// Outcome of attempting to consume one unit of the daily quota.
    #[derive(Debug, Clone)]
    pub struct ConsumeQuotaResult {
        /// False when the request was refused because the quota is spent
        pub allowed: bool,
        pub usage: AiUsageResponse,
    }
}
