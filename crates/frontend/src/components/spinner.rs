//! Loading indicators

use yew::prelude::*;

/// Where the spinner sits
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SpinnerSize {
    /// Centered in the page body while a page loads
    #[default]
    Page,
    /// Next to text, e.g. inside a summary line
    Inline,
}

impl SpinnerSize {
    const fn classes(self) -> (&'static str, &'static str) {
        match self {
            Self::Page => ("flex flex-col items-center gap-4 py-10", "w-10 h-10 border-4"),
            Self::Inline => ("inline-flex items-center gap-2", "w-4 h-4 border-2"),
        }
    }
}

#[derive(Properties, PartialEq)]
pub struct SpinnerProps {
    #[prop_or(AttrValue::Static("Loading..."))]
    pub text: AttrValue,
    #[prop_or_default]
    pub size: SpinnerSize,
}

#[function_component(LoadingSpinner)]
pub fn loading_spinner(props: &SpinnerProps) -> Html {
    let (wrapper, ring) = props.size.classes();

    html! {
        <div class={wrapper} role="status">
            <span class={classes!(ring, "rounded-full", "animate-spin", "border-gray-200", "border-t-blue-500")} />
            <span class="text-sm text-gray-500 dark:text-gray-400">{props.text.clone()}</span>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::wasm_bindgen_test;

    #[wasm_bindgen_test]
    fn test_inline_spinner_is_smaller() {
        assert_eq!(SpinnerSize::default(), SpinnerSize::Page);
        assert!(SpinnerSize::Inline.classes().1.starts_with("w-4"));
        assert!(SpinnerSize::Page.classes().1.starts_with("w-10"));
    }
}
