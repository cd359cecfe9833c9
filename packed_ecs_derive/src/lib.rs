mod component;

use proc_macro::TokenStream;
use syn::DeriveInput;

/// Implements `packed_ecs::components::Component` for a type.
///
/// The component label defaults to the type name and can be overridden with
/// `#[component(label = "...")]`. Types that need custom `create`, `destroy` or `inspect`
/// hooks should implement the trait by hand instead.
#[proc_macro_derive(Component, attributes(component))]
pub fn derive_component(input: TokenStream) -> TokenStream {
    let ast = syn::parse_macro_input!(input as DeriveInput);
    component::impl_component(&ast)
}
