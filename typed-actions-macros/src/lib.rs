//! Procedural macros for typed-actions

use darling::{FromDeriveInput, FromField};
use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{parse_macro_input, DeriveInput};

/// Container-level attributes for #[derive(ActionFamily)]
#[derive(Debug, FromDeriveInput)]
#[darling(attributes(action), supports(struct_named))]
struct FamilyOpts {
    ident: syn::Ident,
    generics: syn::Generics,
    data: darling::ast::Data<(), FamilyField>,

    /// Prepended to every action name in the family
    #[darling(default)]
    prefix: Option<String>,
}

/// Field-level attributes
#[derive(Debug, FromField)]
#[darling(attributes(action))]
struct FamilyField {
    ident: Option<syn::Ident>,
    ty: syn::Type,

    /// Explicit base name (defaults to the field name in title case)
    #[darling(default)]
    name: Option<String>,

    /// Use a process-unique symbol tag instead of a registered name
    #[darling(default)]
    symbol: bool,
}

/// Convert snake_case to space-separated title case
///
/// `fetch_todos` becomes `Fetch Todos`.
fn to_title_case(s: &str) -> String {
    s.split('_')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                None => String::new(),
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Derive macro for the ActionFamily trait
///
/// Generates `define(&mut TypeRegistry) -> Result<Self>` that defines every
/// field and claims its canonical names, failing on the first name already
/// claimed. Each field type must implement `Definable` (action descriptors and
/// scenarios do), unless it is marked `#[action(symbol)]`.
///
/// Field attributes:
/// - `#[action(name = "...")]` - base name (default: field name in title case)
/// - `#[action(symbol)]` - symbol-tagged, not registered
///
/// Container attributes:
/// - `#[action(prefix = "...")]` - prepended to every base name
///
/// # Example
/// ```ignore
/// #[derive(ActionFamily)]
/// #[action(prefix = "Todos/")]
/// struct TodoActions {
///     add_todo: ActionDescriptor<String>,
///     #[action(name = "Fetch")]
///     fetch: Scenario<(), Vec<String>, u16>,
///     #[action(symbol)]
///     reset: ActionDescriptor<()>,
/// }
///
/// let todos = TodoActions::define(&mut registry)?;
/// assert_eq!(todos.add_todo.action_type(), "Todos/Add Todo");
/// assert_eq!(todos.fetch.success().action_type(), "Todos/Fetch Success");
/// ```
#[proc_macro_derive(ActionFamily, attributes(action))]
pub fn derive_action_family(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    let opts = match FamilyOpts::from_derive_input(&input) {
        Ok(opts) => opts,
        Err(e) => return e.write_errors().into(),
    };

    let name = &opts.ident;
    let (impl_generics, ty_generics, where_clause) = opts.generics.split_for_impl();
    let prefix = opts.prefix.clone().unwrap_or_default();

    let fields = match &opts.data {
        darling::ast::Data::Struct(fields) => fields,
        _ => {
            return syn::Error::new_spanned(&input, "ActionFamily can only be derived for structs")
                .to_compile_error()
                .into();
        }
    };

    let mut inits: Vec<TokenStream2> = Vec::new();
    for field in fields.iter() {
        let Some(field_ident) = &field.ident else {
            return syn::Error::new_spanned(&field.ty, "ActionFamily fields must be named")
                .to_compile_error()
                .into();
        };

        let base = field
            .name
            .clone()
            .unwrap_or_else(|| to_title_case(&field_ident.to_string()));
        let action_name = format!("{}{}", prefix, base);
        let ty = &field.ty;

        let init = if field.symbol {
            quote! {
                #field_ident: ::typed_actions::define_symbol(#action_name)
            }
        } else {
            quote! {
                #field_ident: <#ty as ::typed_actions::Definable>::define_in(registry, #action_name)?
            }
        };
        inits.push(init);
    }

    let expanded = quote! {
        impl #impl_generics ::typed_actions::ActionFamily for #name #ty_generics #where_clause {
            #[allow(unused_variables)]
            fn define(
                registry: &mut ::typed_actions::TypeRegistry,
            ) -> ::typed_actions::Result<Self> {
                ::core::result::Result::Ok(Self {
                    #(#inits,)*
                })
            }
        }
    };

    TokenStream::from(expanded)
}
