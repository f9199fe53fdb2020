//! Signup and profile-edit flow.
//!
//! The form is filled in five steps. Each step is validated before the
//! flow may move on, and [`submit`] validates the whole form again before
//! anything is written to the store.
//!
//! ```text
//! BasicInfo ─► Work? ─► Education? ─► Citizenship ─► Additional ─► submit
//!                                                                    │
//!                 LocalStore.users  ◄── profile, username, current ◄─┤
//!                 LocalStore.images ◄── picture moved to full name ◄─┘
//! ```

mod error;
mod form;
mod record;

pub use error::{FormError, Step};
pub use form::{
    AdditionalInfo, BasicInfo, Citizenship, Education, FormMode, SignupForm, VISA_TYPES,
    WorkExperience,
};
pub use record::{Certification, Profile, Project};

use crate::log;
use crate::store::LocalStore;
use crate::utils::date::Date;

/// Validate `form` and record it in `store`.
///
/// The submitter becomes the current user and their username is mapped
/// to their full name. A picture uploaded under `image_key` (or, in edit
/// mode, under the previous current user) is moved to the full name.
/// Passwords are checked for presence only and never stored.
pub fn submit(
    store: &mut LocalStore,
    form: SignupForm,
    mode: FormMode,
    image_key: Option<&str>,
) -> Result<Profile, FormError> {
    form.validate(mode)?;

    let full_name = form.full_name();
    let previous_key = image_key.map(str::to_string).or_else(|| match mode {
        FormMode::Edit => store.users.current_user().map(str::to_string),
        FormMode::Signup => None,
    });

    if let Some(previous) = previous_key
        && store.images.rename_profile_picture(&previous, &full_name)
    {
        log!("profile"; "moved profile picture from `{}` to `{}`", previous, full_name);
    }

    let profile = form.into_profile(Date::today());

    store.users.set_current_user(full_name.clone());
    store.users.map_username(profile.username.clone(), full_name.clone());
    store.users.set_profile(full_name.clone(), profile.clone());

    log!(
        "profile";
        "{} `{}`",
        match mode {
            FormMode::Signup => "created",
            FormMode::Edit => "updated",
        },
        full_name
    );
    Ok(profile)
}
