pub mod bookmarklet;
pub mod html;
