//! Signup form: one record per step, validated at step boundaries.

use serde::{Deserialize, Serialize};

use super::error::{FormError, Step};
use super::record::{Certification, Profile, Project, full_name};
use crate::utils::date::Date;

/// Visa types offered by the citizenship step. An empty value means
/// "not selected".
pub const VISA_TYPES: [&str; 7] = ["F-1", "J-1", "H-1B", "OPT", "CPT", "U.S. Citizen", "Other"];

/// Whether the form creates a new account or edits an existing profile.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FormMode {
    #[default]
    Signup,
    Edit,
}

/// Step 1.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BasicInfo {
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    /// Only checked for presence, never stored.
    #[serde(skip_serializing)]
    pub password: Option<String>,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub age: Option<u32>,
}

/// Step 2. Skippable ("no work experience").
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WorkExperience {
    pub company: String,
    pub title: String,
    pub start_date: String,
    pub end_date: String,
    /// "I currently work here": the end date becomes today.
    pub current: bool,
}

/// Step 3. Skippable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Education {
    pub university: String,
    pub major: String,
    pub start_date: String,
    pub end_date: String,
    /// "I am currently enrolled".
    pub current: bool,
}

/// Step 4.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Citizenship {
    pub country: String,
    pub visa_type: String,
    pub seeking_work_auth: bool,
}

/// Step 5.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AdditionalInfo {
    /// File name of the uploaded photo, if any.
    pub profile_picture: Option<String>,
    pub about_me: String,
    pub projects: Vec<Project>,
    pub certifications: Vec<Certification>,
}

/// The whole signup form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SignupForm {
    pub basic: BasicInfo,
    pub work: Option<WorkExperience>,
    pub education: Option<Education>,
    pub citizenship: Citizenship,
    pub additional: AdditionalInfo,
}

impl SignupForm {
    /// Key the profile and its picture are stored under.
    pub fn full_name(&self) -> String {
        full_name(&self.basic.first_name, &self.basic.last_name)
    }

    /// Check whether `step` may be left.
    pub fn validate_step(&self, step: Step, mode: FormMode) -> Result<(), FormError> {
        self.validate_step_at(step, mode, Date::today())
    }

    /// Check every step in order, stopping at the first failure.
    pub fn validate(&self, mode: FormMode) -> Result<(), FormError> {
        let today = Date::today();
        Step::ALL
            .into_iter()
            .try_for_each(|step| self.validate_step_at(step, mode, today))
    }

    /// [`validate_step`](Self::validate_step) against a fixed "today".
    pub fn validate_step_at(&self, step: Step, mode: FormMode, today: Date) -> Result<(), FormError> {
        match step {
            Step::BasicInfo => self.basic.validate(mode),
            Step::Work => self.work.as_ref().map_or(Ok(()), |w| w.validate(today)),
            Step::Education => self.education.as_ref().map_or(Ok(()), |e| e.validate(today)),
            Step::Citizenship => self.citizenship.validate(),
            Step::Additional => self.additional.validate(),
        }
    }

    /// Flatten into the stored record. Open-ended ranges end today.
    pub fn into_profile(self, today: Date) -> Profile {
        let Self {
            basic,
            work,
            education,
            citizenship,
            additional,
        } = self;
        let work = work.unwrap_or_default();
        let education = education.unwrap_or_default();

        Profile {
            first_name: basic.first_name.trim().to_string(),
            last_name: basic.last_name.trim().to_string(),
            username: basic.username.trim().to_string(),
            city: basic.city,
            state: basic.state,
            zip: basic.zip,
            age: basic.age.unwrap_or_default(),
            end_date: end_date(&work.end_date, work.current, today),
            company: work.company,
            title: work.title,
            start_date: work.start_date,
            edu_end_date: end_date(&education.end_date, education.current, today),
            university: education.university,
            major: education.major,
            edu_start_date: education.start_date,
            country: citizenship.country,
            visa_type: citizenship.visa_type,
            seeking_work_auth: citizenship.seeking_work_auth,
            about_me: additional.about_me,
            projects: additional.projects,
            certifications: additional.certifications,
            profile_picture_name: additional.profile_picture,
        }
    }
}

impl BasicInfo {
    fn validate(&self, mode: FormMode) -> Result<(), FormError> {
        const STEP: Step = Step::BasicInfo;

        require(STEP, "firstName", &self.first_name)?;
        require(STEP, "lastName", &self.last_name)?;
        require(STEP, "username", &self.username)?;
        if mode == FormMode::Signup {
            require(STEP, "password", self.password.as_deref().unwrap_or_default())?;
        }
        require(STEP, "city", &self.city)?;
        require(STEP, "state", &self.state)?;
        require(STEP, "zip", &self.zip)?;
        match self.age {
            None => Err(FormError::required(STEP, "age")),
            Some(0) => Err(FormError::new(STEP, "age", "must be a positive number")),
            Some(_) => Ok(()),
        }
    }
}

impl WorkExperience {
    fn validate(&self, today: Date) -> Result<(), FormError> {
        const STEP: Step = Step::Work;

        require(STEP, "company", &self.company)?;
        require(STEP, "title", &self.title)?;
        DateRange {
            step: STEP,
            start_field: "startDate",
            end_field: "endDate",
        }
        .check(&self.start_date, &self.end_date, self.current, today)
    }
}

impl Education {
    fn validate(&self, today: Date) -> Result<(), FormError> {
        const STEP: Step = Step::Education;

        require(STEP, "university", &self.university)?;
        require(STEP, "major", &self.major)?;
        DateRange {
            step: STEP,
            start_field: "eduStartDate",
            end_field: "eduEndDate",
        }
        .check(&self.start_date, &self.end_date, self.current, today)
    }
}

impl Citizenship {
    fn validate(&self) -> Result<(), FormError> {
        const STEP: Step = Step::Citizenship;

        require(STEP, "country", &self.country)?;
        let visa = self.visa_type.trim();
        if !visa.is_empty() && !VISA_TYPES.contains(&visa) {
            return Err(FormError::new(
                STEP,
                "visaType",
                format!("`{visa}` is not one of {}", VISA_TYPES.join(", ")),
            ));
        }
        Ok(())
    }
}

impl AdditionalInfo {
    fn validate(&self) -> Result<(), FormError> {
        const STEP: Step = Step::Additional;

        for (i, project) in self.projects.iter().enumerate() {
            if project.title.trim().is_empty() {
                return Err(FormError::new(STEP, "projects", format!("entry {} has no title", i + 1)));
            }
        }

        for (i, cert) in self.certifications.iter().enumerate() {
            let entry = i + 1;
            if cert.name.trim().is_empty() {
                return Err(FormError::new(STEP, "certifications", format!("entry {entry} has no name")));
            }
            let earned = optional_date(STEP, "certifications", &cert.earned_date)?;
            let expiry = optional_date(STEP, "certifications", &cert.expiry_date)?;
            if let (Some(earned), Some(expiry)) = (earned, expiry)
                && expiry < earned
            {
                return Err(FormError::new(
                    STEP,
                    "certifications",
                    format!("entry {entry} expires ({expiry}) before it was earned ({earned})"),
                ));
            }
        }

        Ok(())
    }
}

/// Start/end pair of a step, where the end may be open ("current").
struct DateRange {
    step: Step,
    start_field: &'static str,
    end_field: &'static str,
}

impl DateRange {
    fn check(&self, start: &str, end: &str, current: bool, today: Date) -> Result<(), FormError> {
        let start = self.date(self.start_field, start, today)?;
        if current {
            return Ok(());
        }
        let end = self.date(self.end_field, end, today)?;
        if end < start {
            return Err(FormError::new(
                self.step,
                self.end_field,
                format!("{end} is before {start}"),
            ));
        }
        Ok(())
    }

    fn date(&self, field: &'static str, value: &str, today: Date) -> Result<Date, FormError> {
        require(self.step, field, value)?;
        let date = Date::parse(value).ok_or_else(|| {
            FormError::new(self.step, field, format!("`{}` is not a YYYY-MM-DD date", value.trim()))
        })?;
        if date > today {
            return Err(FormError::new(self.step, field, format!("{date} is in the future")));
        }
        Ok(date)
    }
}

fn require(step: Step, field: &'static str, value: &str) -> Result<(), FormError> {
    if value.trim().is_empty() {
        Err(FormError::required(step, field))
    } else {
        Ok(())
    }
}

fn optional_date(step: Step, field: &'static str, value: &str) -> Result<Option<Date>, FormError> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }
    Date::parse(value)
        .map(Some)
        .ok_or_else(|| FormError::new(step, field, format!("`{value}` is not a YYYY-MM-DD date")))
}

fn end_date(end: &str, current: bool, today: Date) -> String {
    if current {
        today.to_string()
    } else {
        end.to_string()
    }
}
