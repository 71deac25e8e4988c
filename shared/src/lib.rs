use chrono::{DateTime, Datelike, Local, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Marital status options offered by the personal details form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MaritalStatus {
    #[serde(rename = "Never Married")]
    NeverMarried,
    Divorced,
    Widowed,
    #[serde(rename = "Awaiting Divorce")]
    AwaitingDivorce,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Religion {
    Hindu,
    Muslim,
    Christian,
    Sikh,
    Buddhist,
    Jain,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Manglik {
    Yes,
    No,
    Anshik,
    #[serde(rename = "Don't Know")]
    DontKnow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FamilyType {
    Nuclear,
    Joint,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FamilyStatus {
    #[serde(rename = "Middle Class")]
    MiddleClass,
    #[serde(rename = "Upper Middle Class")]
    UpperMiddleClass,
    Rich,
    Affluent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FamilyValues {
    Traditional,
    Moderate,
    Liberal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Diet {
    Vegetarian,
    #[serde(rename = "Non-Vegetarian")]
    NonVegetarian,
    Eggetarian,
    Vegan,
}

/// Drinking/smoking habit options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Habit {
    Yes,
    No,
    Occasionally,
    Socially,
}

/// Personal details section of a biodata record.
///
/// Required fields are plain strings (empty means "not yet filled") so a
/// partially edited section round-trips through the draft store unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersonalDetails {
    pub full_name: String,
    /// ISO 8601 date (YYYY-MM-DD)
    pub date_of_birth: String,
    pub time_of_birth: Option<String>,
    pub place_of_birth: String,
    /// Derived from date_of_birth whenever that changes (one-way sync)
    pub age: String,
    pub height: String,
    pub weight: Option<String>,
    pub complexion: Option<String>,
    pub blood_group: Option<String>,
    pub physical_status: Option<String>,
    pub marital_status: Option<MaritalStatus>,
    pub mother_tongue: String,
    pub religion: Option<Religion>,
    pub caste: Option<String>,
    pub sub_caste: Option<String>,
    pub gotra: Option<String>,
    pub manglik: Option<Manglik>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EducationProfession {
    pub highest_qualification: String,
    pub institute_name: Option<String>,
    pub profession: String,
    pub company_name: Option<String>,
    pub designation: Option<String>,
    pub annual_income: Option<String>,
    pub work_location: Option<String>,
    pub about_profession: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FamilyDetails {
    pub father_name: String,
    pub father_occupation: Option<String>,
    pub mother_name: String,
    pub mother_occupation: Option<String>,
    pub siblings: Option<String>,
    pub family_type: Option<FamilyType>,
    pub family_status: Option<FamilyStatus>,
    pub family_values: Option<FamilyValues>,
    pub about_family: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LifestylePreferences {
    pub diet: Option<Diet>,
    pub drinking: Option<Habit>,
    pub smoking: Option<Habit>,
    pub hobbies: Option<String>,
    pub interests: Option<String>,
    pub about_me: Option<String>,
    pub partner_expectations: Option<String>,
}

/// Horoscope section - every field is optional
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HoroscopeDetails {
    pub rashi: Option<String>,
    pub nakshatra: Option<String>,
    pub gan: Option<String>,
    pub nadi: Option<String>,
    pub charan: Option<String>,
    pub birth_star: Option<String>,
    pub horoscope_match: Option<String>,
    pub additional_info: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContactInformation {
    pub mobile_number: String,
    pub alternate_number: Option<String>,
    pub email: Option<String>,
    pub whatsapp_number: Option<String>,
    pub address: Option<String>,
    pub city: String,
    pub state: String,
    pub pincode: Option<String>,
    pub contact_person: Option<String>,
}

/// Identifies one of the six sections of a biodata record.
/// Wizard steps are exactly these identifiers, visited in declared order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Hash)]
#[serde(rename_all = "lowercase")]
pub enum SectionKey {
    Personal,
    Education,
    Family,
    Lifestyle,
    Horoscope,
    Contact,
}

impl SectionKey {
    /// All sections in wizard declaration order
    pub const ALL: [SectionKey; 6] = [
        SectionKey::Personal,
        SectionKey::Education,
        SectionKey::Family,
        SectionKey::Lifestyle,
        SectionKey::Horoscope,
        SectionKey::Contact,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SectionKey::Personal => "personal",
            SectionKey::Education => "education",
            SectionKey::Family => "family",
            SectionKey::Lifestyle => "lifestyle",
            SectionKey::Horoscope => "horoscope",
            SectionKey::Contact => "contact",
        }
    }

    /// Step label shown in the wizard step indicator
    pub fn label(&self) -> &'static str {
        match self {
            SectionKey::Personal => "Personal Details",
            SectionKey::Education => "Education & Career",
            SectionKey::Family => "Family Details",
            SectionKey::Lifestyle => "Lifestyle",
            SectionKey::Horoscope => "Horoscope",
            SectionKey::Contact => "Contact",
        }
    }

    /// Position of this section in the declared wizard order
    pub fn index(&self) -> usize {
        Self::ALL.iter().position(|s| s == self).unwrap_or(0)
    }
}

impl std::str::FromStr for SectionKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "personal" => Ok(SectionKey::Personal),
            "education" => Ok(SectionKey::Education),
            "family" => Ok(SectionKey::Family),
            "lifestyle" => Ok(SectionKey::Lifestyle),
            "horoscope" => Ok(SectionKey::Horoscope),
            "contact" => Ok(SectionKey::Contact),
            other => Err(format!("Unknown section: {}", other)),
        }
    }
}

impl fmt::Display for SectionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The aggregate record a user builds across the wizard.
///
/// Every section is independently partial during editing, so each one is an
/// `Option`; a missing section deserializes as `None` rather than failing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BiodataData {
    pub personal: Option<PersonalDetails>,
    pub education: Option<EducationProfession>,
    pub family: Option<FamilyDetails>,
    pub lifestyle: Option<LifestylePreferences>,
    pub horoscope: Option<HoroscopeDetails>,
    pub contact: Option<ContactInformation>,
    /// Embedded image data URL, not a reference
    pub profile_photo: Option<String>,
}

/// Completion metric for one section: required fields filled vs total.
/// Purely presentational - never gates wizard navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionProgress {
    pub completed: u32,
    pub total: u32,
}

impl SectionProgress {
    pub fn percent(&self) -> u32 {
        if self.total == 0 {
            100
        } else {
            (self.completed * 100) / self.total
        }
    }

    pub fn is_complete(&self) -> bool {
        self.completed >= self.total
    }
}

fn filled(value: &str) -> bool {
    !value.trim().is_empty()
}

impl BiodataData {
    pub fn is_empty(&self) -> bool {
        *self == BiodataData::default()
    }

    /// Merge a partial JSON patch into one section, matching the spread-style
    /// section update of the editing flow: present keys overwrite, absent
    /// keys keep their current value.
    ///
    /// When the personal patch carries a `dateOfBirth`, the derived `age` is
    /// recomputed against `today` and overwrites whatever was there before
    /// (one-way sync; setting `age` directly never back-writes the date).
    pub fn merge_section(
        &mut self,
        key: SectionKey,
        patch: &serde_json::Value,
        today: NaiveDate,
    ) -> Result<(), serde_json::Error> {
        use serde::de::Error;

        let patch_obj = patch
            .as_object()
            .ok_or_else(|| serde_json::Error::custom("section patch must be a JSON object"))?;

        match key {
            SectionKey::Personal => {
                let mut section = merge_into(self.personal.take().unwrap_or_default(), patch_obj)?;
                if patch_obj.contains_key("dateOfBirth") {
                    if let Ok(dob) = NaiveDate::parse_from_str(&section.date_of_birth, "%Y-%m-%d") {
                        section.age = calculate_age(dob, today).to_string();
                    }
                }
                self.personal = Some(section);
            }
            SectionKey::Education => {
                self.education =
                    Some(merge_into(self.education.take().unwrap_or_default(), patch_obj)?);
            }
            SectionKey::Family => {
                self.family = Some(merge_into(self.family.take().unwrap_or_default(), patch_obj)?);
            }
            SectionKey::Lifestyle => {
                self.lifestyle =
                    Some(merge_into(self.lifestyle.take().unwrap_or_default(), patch_obj)?);
            }
            SectionKey::Horoscope => {
                self.horoscope =
                    Some(merge_into(self.horoscope.take().unwrap_or_default(), patch_obj)?);
            }
            SectionKey::Contact => {
                self.contact = Some(merge_into(self.contact.take().unwrap_or_default(), patch_obj)?);
            }
        }

        Ok(())
    }

    /// Required-field completion for one section
    pub fn section_progress(&self, key: SectionKey) -> SectionProgress {
        match key {
            SectionKey::Personal => {
                let total = 8;
                let completed = match &self.personal {
                    Some(p) => {
                        [&p.full_name, &p.date_of_birth, &p.place_of_birth, &p.age, &p.height, &p.mother_tongue]
                            .iter()
                            .filter(|v| filled(v))
                            .count() as u32
                            + p.marital_status.is_some() as u32
                            + p.religion.is_some() as u32
                    }
                    None => 0,
                };
                SectionProgress { completed, total }
            }
            SectionKey::Education => {
                let total = 2;
                let completed = match &self.education {
                    Some(e) => [&e.highest_qualification, &e.profession]
                        .iter()
                        .filter(|v| filled(v))
                        .count() as u32,
                    None => 0,
                };
                SectionProgress { completed, total }
            }
            SectionKey::Family => {
                let total = 2;
                let completed = match &self.family {
                    Some(f) => [&f.father_name, &f.mother_name]
                        .iter()
                        .filter(|v| filled(v))
                        .count() as u32,
                    None => 0,
                };
                SectionProgress { completed, total }
            }
            // Lifestyle and horoscope have no required fields
            SectionKey::Lifestyle | SectionKey::Horoscope => SectionProgress { completed: 0, total: 0 },
            SectionKey::Contact => {
                let total = 3;
                let completed = match &self.contact {
                    Some(c) => [&c.mobile_number, &c.city, &c.state]
                        .iter()
                        .filter(|v| filled(v))
                        .count() as u32,
                    None => 0,
                };
                SectionProgress { completed, total }
            }
        }
    }

    /// Full name from the personal section, if filled
    pub fn full_name(&self) -> Option<&str> {
        self.personal
            .as_ref()
            .map(|p| p.full_name.trim())
            .filter(|n| !n.is_empty())
    }
}

/// Object-level merge of a JSON patch into an existing section value
fn merge_into<T>(
    current: T,
    patch: &serde_json::Map<String, serde_json::Value>,
) -> Result<T, serde_json::Error>
where
    T: Serialize + serde::de::DeserializeOwned,
{
    let mut value = serde_json::to_value(current)?;
    if let Some(obj) = value.as_object_mut() {
        for (k, v) in patch {
            obj.insert(k.clone(), v.clone());
        }
    }
    serde_json::from_value(value)
}

/// Calendar-aware age derivation: subtract a year when the birthday in the
/// current year has not yet passed.
pub fn calculate_age(date_of_birth: NaiveDate, today: NaiveDate) -> i32 {
    let mut age = today.year() - date_of_birth.year();
    let birthday_passed = (today.month(), today.day()) >= (date_of_birth.month(), date_of_birth.day());
    if !birthday_passed {
        age -= 1;
    }
    age
}

/// "Today" in the user's local timezone, for age derivation at edit time
pub fn today_local() -> NaiveDate {
    Local::now().date_naive()
}

/// Identifier of a presentational template. A finite catalog of known ids
/// with an explicit variant for anything else, so an unknown id is carried
/// through unchanged and resolved to the default renderer instead of
/// silently disappearing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TemplateId {
    Modern1,
    Modern2,
    Modern3,
    Modern4,
    Modern5,
    Traditional1,
    Traditional2,
    Traditional3,
    Traditional4,
    Minimal1,
    Minimal2,
    Minimal3,
    Minimal4,
    Simple1,
    Simple2,
    Unknown(String),
}

impl TemplateId {
    pub fn as_str(&self) -> &str {
        match self {
            TemplateId::Modern1 => "modern-1",
            TemplateId::Modern2 => "modern-2",
            TemplateId::Modern3 => "modern-3",
            TemplateId::Modern4 => "modern-4",
            TemplateId::Modern5 => "modern-5",
            TemplateId::Traditional1 => "traditional-1",
            TemplateId::Traditional2 => "traditional-2",
            TemplateId::Traditional3 => "traditional-3",
            TemplateId::Traditional4 => "traditional-4",
            TemplateId::Minimal1 => "minimal-1",
            TemplateId::Minimal2 => "minimal-2",
            TemplateId::Minimal3 => "minimal-3",
            TemplateId::Minimal4 => "minimal-4",
            TemplateId::Simple1 => "simple-1",
            TemplateId::Simple2 => "simple-2",
            TemplateId::Unknown(id) => id,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, TemplateId::Unknown(_))
    }
}

impl From<String> for TemplateId {
    fn from(s: String) -> Self {
        match s.as_str() {
            "modern-1" => TemplateId::Modern1,
            "modern-2" => TemplateId::Modern2,
            "modern-3" => TemplateId::Modern3,
            "modern-4" => TemplateId::Modern4,
            "modern-5" => TemplateId::Modern5,
            "traditional-1" => TemplateId::Traditional1,
            "traditional-2" => TemplateId::Traditional2,
            "traditional-3" => TemplateId::Traditional3,
            "traditional-4" => TemplateId::Traditional4,
            "minimal-1" => TemplateId::Minimal1,
            "minimal-2" => TemplateId::Minimal2,
            "minimal-3" => TemplateId::Minimal3,
            "minimal-4" => TemplateId::Minimal4,
            "simple-1" => TemplateId::Simple1,
            "simple-2" => TemplateId::Simple2,
            _ => TemplateId::Unknown(s),
        }
    }
}

impl From<TemplateId> for String {
    fn from(id: TemplateId) -> Self {
        id.as_str().to_string()
    }
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Template and theme selection, independent of the record itself
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TemplateCustomization {
    pub template_id: TemplateId,
    pub primary_color: String,
    pub font_family: String,
    pub show_photo: bool,
    pub hidden_sections: Vec<SectionKey>,
}

impl Default for TemplateCustomization {
    fn default() -> Self {
        Self {
            template_id: TemplateId::Modern1,
            primary_color: "#2563eb".to_string(),
            font_family: "Inter, sans-serif".to_string(),
            show_photo: true,
            hidden_sections: Vec::new(),
        }
    }
}

impl TemplateCustomization {
    /// Sections a renderer should show, in wizard order, with hidden
    /// sections omitted
    pub fn visible_sections(&self) -> Vec<SectionKey> {
        SectionKey::ALL
            .iter()
            .copied()
            .filter(|s| !self.hidden_sections.contains(s))
            .collect()
    }
}

/// Partial customization update
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CustomizationUpdate {
    pub template_id: Option<TemplateId>,
    pub primary_color: Option<String>,
    pub font_family: Option<String>,
    pub show_photo: Option<bool>,
    pub hidden_sections: Option<Vec<SectionKey>>,
}

/// A time-limited public copy of a record, immutable once created except
/// for its view counter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SharedBiodata {
    pub id: String,
    pub data: BiodataData,
    pub template_id: TemplateId,
    pub customization: TemplateCustomization,
    pub expires_at: DateTime<Utc>,
    pub view_count: i64,
}

/// Request to create a share link
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateShareRequest {
    pub data: BiodataData,
    pub customization: TemplateCustomization,
    /// 24 (one day) or 168 (one week)
    pub expiry_hours: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateShareResponse {
    pub share_id: String,
    pub share_url: String,
    pub qr_code_url: String,
}

/// A named, session-scoped snapshot a user can reload later
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedTemplate {
    pub id: String,
    pub user_session_id: String,
    pub template_name: String,
    pub biodata_data: BiodataData,
    pub template_id: TemplateId,
    pub customization: TemplateCustomization,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub is_favorite: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveTemplateRequest {
    pub session_id: String,
    pub template_name: String,
    pub biodata_data: BiodataData,
    pub template_id: TemplateId,
    pub customization: TemplateCustomization,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateSavedTemplateRequest {
    pub template_name: Option<String>,
    pub is_favorite: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedTemplateListResponse {
    pub templates: Vec<SavedTemplate>,
}

/// Result of checking one field value against its validation rule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub error: Option<String>,
}

impl ValidationResult {
    pub fn ok() -> Self {
        Self { is_valid: true, error: None }
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self { is_valid: false, error: Some(message.into()) }
    }
}

/// Daily quota state for the text-improvement helper
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiUsage {
    pub count: u32,
    pub reset_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiUsageResponse {
    pub count: u32,
    pub limit: u32,
    pub remaining: u32,
    pub reset_at: DateTime<Utc>,
}

/// Snapshot of the single mutable editing session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorSnapshot {
    pub data: BiodataData,
    pub customization: TemplateCustomization,
    pub current_step: SectionKey,
    pub preview_mode: bool,
}

/// Per-step completion for the wizard progress indicator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepProgress {
    pub step: SectionKey,
    pub label: String,
    pub completed: u32,
    pub total: u32,
    pub percent: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WizardProgressResponse {
    pub current_step: SectionKey,
    pub steps: Vec<StepProgress>,
}

/// Generate an opaque session pseudo-identity for scoping saved templates.
/// Not a security boundary: any client holding the token owns the rows.
pub fn generate_session_id() -> String {
    let millis = Utc::now().timestamp_millis();
    let suffix = uuid::Uuid::new_v4().simple().to_string();
    format!("sess_{}_{}", millis, &suffix[..7])
}
