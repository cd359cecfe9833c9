use syn::{DeriveInput, Lit, Meta, NestedMeta};
use proc_macro::TokenStream;
use quote::quote;

pub fn impl_component(ast: &DeriveInput) -> TokenStream {
    let name = &ast.ident;
    let (impl_generics, ty_generics, where_clause) = ast.generics.split_for_impl();

    let label = match find_label(ast) {
        Ok(label) => label.unwrap_or_else(|| name.to_string()),
        Err(err) => return err.to_compile_error().into(),
    };

    let gen = quote! {
        impl #impl_generics packed_ecs::components::Component for #name #ty_generics #where_clause {
            const LABEL: &'static str = #label;
        }
    };
    gen.into()
}

fn find_label(ast: &DeriveInput) -> syn::Result<Option<String>> {
    let mut label = None;

    for attr in ast.attrs.iter().filter(|a| a.path.is_ident("component")) {
        let list = match attr.parse_meta()? {
            Meta::List(list) => list,
            meta => {
                return Err(syn::Error::new_spanned(
                    meta,
                    "expected #[component(label = \"...\")]",
                ))
            },
        };

        for nested in list.nested {
            match nested {
                NestedMeta::Meta(Meta::NameValue(nv)) if nv.path.is_ident("label") => match nv.lit {
                    Lit::Str(value) => label = Some(value.value()),
                    lit => return Err(syn::Error::new_spanned(lit, "expected a string literal")),
                },
                other => return Err(syn::Error::new_spanned(other, "unknown component attribute")),
            }
        }
    }

    Ok(label)
}
