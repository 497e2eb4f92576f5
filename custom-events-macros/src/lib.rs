//! Eventable derive macro (proc macro crate)
//!
//! Generates `custom_events::Eventable` for a struct so every instance can be
//! normalized into the canonical `CustomEvent` shape without a hand-written
//! conversion per event kind.

use proc_macro::TokenStream;
use proc_macro2::{TokenStream as TokenStream2, TokenTree};
use quote::{quote, ToTokens};
use syn::ext::IdentExt;
use syn::{
    parse_macro_input, parse_quote, Attribute, Data, DeriveInput, Expr, ExprLit, Fields,
    GenericParam, Generics, Ident, Index, Lit, LitStr, Type,
};

/// Derive `Eventable` for a struct
///
/// Usage:
/// ```rust,ignore
/// use custom_events::Eventable;
///
/// #[derive(Serialize, Eventable)]
/// #[eventable(event_type = "payment_rejected")]
/// pub struct PaymentRejected {
///     customer_id: String,
///     amount: u64,
///     currency: String,
/// }
/// ```
///
/// `event_type` must be a non-blank string literal. Without it the tag is the
/// fully-qualified path of the type, e.g. `billing::events::PaymentRejected`.
///
/// Type parameters that appear in field types get a `Serialize` bound;
/// parameters used only inside `PhantomData` do not.
#[proc_macro_derive(Eventable, attributes(eventable))]
pub fn derive_eventable(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

fn expand(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let options = EventableOptions::from_attrs(&input.attrs)?;
    let name = &input.ident;

    let fields = match &input.data {
        Data::Struct(data) => &data.fields,
        Data::Enum(data) => {
            return Err(syn::Error::new(
                data.enum_token.span,
                "Eventable can only be derived for structs",
            ))
        }
        Data::Union(data) => {
            return Err(syn::Error::new(
                data.union_token.span,
                "Eventable can only be derived for structs",
            ))
        }
    };

    let tag = options.tag_tokens(name);
    let body = conversion_body(fields, &tag);

    let mut generics = input.generics.clone();
    add_serialize_bounds(&mut generics, fields);
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    Ok(quote! {
        #[automatically_derived]
        impl #impl_generics ::custom_events::Eventable for #name #ty_generics #where_clause {
            fn to_event(&self) -> ::custom_events::CustomEvent {
                #body
            }
        }
    })
}

/// Options read from `#[eventable(...)]`
struct EventableOptions {
    event_type: Option<LitStr>,
}

impl EventableOptions {
    fn from_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut event_type: Option<LitStr> = None;

        for attr in attrs.iter().filter(|attr| attr.path().is_ident("eventable")) {
            attr.parse_nested_meta(|meta| {
                if !meta.path.is_ident("event_type") {
                    return Err(meta.error("unsupported eventable option, expected `event_type`"));
                }
                if event_type.is_some() {
                    return Err(meta.error("duplicate `event_type` option"));
                }

                let expr: Expr = meta.value()?.parse()?;
                let Expr::Lit(ExprLit { lit: Lit::Str(lit), .. }) = expr else {
                    return Err(syn::Error::new_spanned(
                        expr,
                        "`event_type` must be a string literal",
                    ));
                };
                // Same rule as `custom_events::is_blank_tag`
                if lit.value().bytes().all(|byte| byte.is_ascii_whitespace()) {
                    return Err(syn::Error::new(lit.span(), "`event_type` must not be blank"));
                }
                event_type = Some(lit);
                Ok(())
            })?;
        }

        Ok(Self { event_type })
    }

    /// Tokens evaluating to the `EventType` of every derived event
    fn tag_tokens(&self, name: &Ident) -> TokenStream2 {
        match &self.event_type {
            Some(lit) => quote! { ::custom_events::EventType::from_static(#lit) },
            None => {
                let type_name = LitStr::new(&name.unraw().to_string(), name.span());
                quote! {
                    ::custom_events::EventType::from_static(
                        ::core::concat!(::core::module_path!(), "::", #type_name)
                    )
                }
            }
        }
    }
}

/// Shallow field capture: every declared field, by name, in declaration order
fn conversion_body(fields: &Fields, tag: &TokenStream2) -> TokenStream2 {
    let inserts: Vec<TokenStream2> = match fields {
        Fields::Named(named) => named
            .named
            .iter()
            .filter_map(|field| field.ident.as_ref())
            .map(|ident| {
                let key = LitStr::new(&ident.unraw().to_string(), ident.span());
                quote! { data.insert_field(#key, &self.#ident); }
            })
            .collect(),
        Fields::Unnamed(unnamed) => unnamed
            .unnamed
            .iter()
            .enumerate()
            .map(|(position, _)| {
                let index = Index::from(position);
                let key = position.to_string();
                quote! { data.insert_field(#key, &self.#index); }
            })
            .collect(),
        Fields::Unit => {
            return quote! {
                ::custom_events::CustomEvent::from_checked_parts(#tag, ::core::option::Option::None)
            };
        }
    };

    quote! {
        let mut data = ::custom_events::EventData::new();
        #(#inserts)*
        ::custom_events::CustomEvent::from_checked_parts(#tag, ::core::option::Option::Some(data))
    }
}

fn add_serialize_bounds(generics: &mut Generics, fields: &Fields) {
    let serialized: Vec<&Type> = fields
        .iter()
        .map(|field| &field.ty)
        .filter(|ty| !is_phantom_data(ty))
        .collect();

    for param in &mut generics.params {
        if let GenericParam::Type(ty) = param {
            let used = serialized
                .iter()
                .any(|field_ty| mentions(field_ty.to_token_stream(), &ty.ident));
            if used {
                ty.bounds.push(parse_quote!(::custom_events::serde::Serialize));
            }
        }
    }
}

fn is_phantom_data(ty: &Type) -> bool {
    match ty {
        Type::Path(path) => path
            .path
            .segments
            .last()
            .is_some_and(|segment| segment.ident == "PhantomData"),
        _ => false,
    }
}

fn mentions(tokens: TokenStream2, ident: &Ident) -> bool {
    tokens.into_iter().any(|tree| match tree {
        TokenTree::Ident(found) => found == *ident,
        TokenTree::Group(group) => mentions(group.stream(), ident),
        _ => false,
    })
}
