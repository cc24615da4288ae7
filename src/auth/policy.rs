//! Who may change a blog.
//!
//! Editing is reserved to the author. Deleting is also open to staff users,
//! edits get no staff override.

use crate::database::models::{Blog, User};

pub fn can_edit_blog(requester: Option<&User>, blog: &Blog) -> bool {
    requester.map_or(false, |user| blog.is_written_by(user))
}

pub fn can_delete_blog(requester: Option<&User>, blog: &Blog) -> bool {
    requester.map_or(false, |user| blog.is_written_by(user) || user.is_staff)
}
