extern crate proc_macro;

use proc_macro::TokenStream;
use quote::quote;
use syn::punctuated::Punctuated;
use syn::{parse_macro_input, Expr, ItemStruct, Lit, MetaNameValue, Token};

/// Binds a jar key to a marker struct by implementing `crumbjar::cookies::CookieName`.
///
/// ```ignore
/// #[cookie(name = "theme")]
/// pub struct Theme;
/// ```
#[proc_macro_attribute]
pub fn cookie(attr: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemStruct);

    let args = parse_macro_input!(attr with Punctuated::<MetaNameValue, Token![,]>::parse_terminated);

    let mut cookie_name = None;

    for arg in &args {
        if !arg.path.is_ident("name") {
            return syn::Error::new_spanned(
                &arg.path,
                "Unknown parameter, expected only `name`: #[cookie(name = \"...\")]",
            )
            .into_compile_error()
            .into();
        }
        match &arg.value {
            Expr::Lit(expr) => match &expr.lit {
                Lit::Str(lit_str) => cookie_name = Some((lit_str.value(), lit_str.clone())),
                other => {
                    return syn::Error::new_spanned(other, "The cookie name must be a string literal")
                        .into_compile_error()
                        .into();
                }
            },
            other => {
                return syn::Error::new_spanned(other, "The cookie name must be a string literal")
                    .into_compile_error()
                    .into();
            }
        }
    }

    let cookie_name = match cookie_name {
        Some((name, _)) if !name.is_empty() => name,
        Some((_, lit)) => {
            return syn::Error::new_spanned(lit, "The cookie name cannot be empty")
                .into_compile_error()
                .into();
        }
        None => {
            return syn::Error::new_spanned(
                &input.ident,
                "Expected `name` parameter: #[cookie(name = \"...\")]",
            )
            .into_compile_error()
            .into();
        }
    };

    let cookie_struct = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let expanded = quote! {
        #input

        impl #impl_generics ::crumbjar::cookies::CookieName for #cookie_struct #ty_generics #where_clause {
            const COOKIE_NAME: &'static str = #cookie_name;
        }
    };

    expanded.into()
}
