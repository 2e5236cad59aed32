pub(crate) mod login;
pub(crate) mod panel;
pub(crate) mod raw_html;
