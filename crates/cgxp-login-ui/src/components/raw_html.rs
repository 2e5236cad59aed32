//! Host-supplied HTML block rendered verbatim.

use gloo::console;
use gloo::utils::document;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub(crate) struct RawHtmlProps {
    pub(crate) html: AttrValue,
    #[prop_or_default]
    pub(crate) class: Classes,
}

#[function_component(RawHtml)]
pub(crate) fn raw_html(props: &RawHtmlProps) -> Html {
    match document().create_element("div") {
        Ok(element) => {
            element.set_inner_html(&props.html);
            element.set_class_name(&props.class.to_string());
            Html::VRef(element.into())
        }
        Err(err) => {
            console::error!("extra html container failed", err);
            html! {}
        }
    }
}
