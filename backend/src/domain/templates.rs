//! Static template catalog and the id -> renderer dispatch.
//!
//! Adding a template means adding a catalog entry and (in the presentation
//! layer) a renderer; there is no runtime registration. Dispatch is total:
//! traditional ids resolve to the traditional renderer family, minimal ids
//! to the minimal family, and everything else, including unknown ids,
//! falls back to the modern family.

use serde::{Deserialize, Serialize};
use shared::TemplateId;

/// Renderer family a template id resolves to. The presentation layer owns
/// the actual markup; the backend only dispatches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RendererFamily {
    Modern,
    Traditional,
    Minimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateCategory {
    Simple,
    Modern,
    Traditional,
    Minimal,
}

/// One catalog entry shown in the template picker
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateInfo {
    pub id: TemplateId,
    pub name: &'static str,
    pub category: TemplateCategory,
    pub is_premium: bool,
    pub renderer: RendererFamily,
}

/// Resolve a template id to its renderer family, with modern as the
/// explicit default arm
pub fn renderer_for(id: &TemplateId) -> RendererFamily {
    match id {
        TemplateId::Traditional1
        | TemplateId::Traditional2
        | TemplateId::Traditional3
        | TemplateId::Traditional4 => RendererFamily::Traditional,
        TemplateId::Minimal1 | TemplateId::Minimal2 | TemplateId::Minimal3 | TemplateId::Minimal4 => {
            RendererFamily::Minimal
        }
        TemplateId::Modern1
        | TemplateId::Modern2
        | TemplateId::Modern3
        | TemplateId::Modern4
        | TemplateId::Modern5
        | TemplateId::Simple1
        | TemplateId::Simple2
        | TemplateId::Unknown(_) => RendererFamily::Modern,
    }
}

fn entry(id: TemplateId, name: &'static str, category: TemplateCategory) -> TemplateInfo {
    let renderer = renderer_for(&id);
    TemplateInfo { id, name, category, is_premium: false, renderer }
}

/// The full template catalog, in picker order
pub fn catalog() -> Vec<TemplateInfo> {
    vec![
        entry(TemplateId::Modern1, "Modern Classic", TemplateCategory::Modern),
        entry(TemplateId::Traditional1, "Traditional Elegant", TemplateCategory::Traditional),
        entry(TemplateId::Minimal1, "Clean Minimal", TemplateCategory::Minimal),
        entry(TemplateId::Modern2, "Modern Professional", TemplateCategory::Modern),
        entry(TemplateId::Traditional2, "Traditional Classic", TemplateCategory::Traditional),
        entry(TemplateId::Minimal2, "Simple Clean", TemplateCategory::Minimal),
        entry(TemplateId::Modern3, "Modern Elegant", TemplateCategory::Modern),
        entry(TemplateId::Traditional3, "Traditional Royal", TemplateCategory::Traditional),
        entry(TemplateId::Minimal3, "Minimal Elegant", TemplateCategory::Minimal),
        entry(TemplateId::Simple1, "Simple Basic", TemplateCategory::Simple),
        entry(TemplateId::Simple2, "Simple Modern", TemplateCategory::Simple),
        entry(TemplateId::Modern4, "Modern Premium", TemplateCategory::Modern),
        entry(TemplateId::Traditional4, "Traditional Premium", TemplateCategory::Traditional),
        entry(TemplateId::Minimal4, "Minimal Premium", TemplateCategory::Minimal),
        entry(TemplateId::Modern5, "Modern Luxury", TemplateCategory::Modern),
    ]
}
