//! Procedural macros for FUSED-Wind type declarations
//!
//! The derive macros in this crate generate an implementation of
//! `fusedwind_core::field::Declared`, so the fields of a type can be listed
//! without ever constructing a value of it.
//!
//! # Variable trees
//!
//! ```ignore
//! use fusedwind_core::TreeFields;
//!
//! #[derive(TreeFields)]
//! pub struct HubVT {
//!     #[field(desc = "Hub diameter")]
//!     pub diameter: f64,
//!     #[field(name = "I_x", desc = "First area moment of inertia")]
//!     pub i_x: f64,
//!     #[field(name = "CM")]
//!     pub cm: [f64; 3],
//! }
//! ```
//!
//! Every named field is declared unless marked `#[field(skip)]`. The field
//! kind is inferred from the Rust type and can be overridden with
//! `#[field(kind = "Float")]`. `#[field(slot = RotorVT)]` declares an interface
//! slot for the interface of `RotorVT`.
//!
//! # Components
//!
//! ```ignore
//! use fusedwind_core::ComponentIO;
//!
//! #[derive(ComponentIO)]
//! #[component(name = "RotorAero")]
//! pub struct RotorAero {
//!     #[input(desc = "Hub height wind speed")]
//!     wind_speed: f64,
//!     #[output(desc = "Aerodynamic power")]
//!     power: f64,
//!     // Parameters (not marked as input/output)
//!     pub nb_sections: usize,
//! }
//! ```
//!
//! This generates the declaration of a component with one input and one
//! output, plus `RotorAero::INPUTS` and `RotorAero::OUTPUTS` name lists.

use proc_macro::TokenStream;
use proc_macro2::{Span, TokenStream as TokenStream2};
use quote::quote;
use syn::{parse_macro_input, Attribute, Data, DeriveInput, Fields, LitStr, Meta, Type};

#[derive(Clone, Copy, PartialEq)]
enum Role {
    Input,
    Output,
}

/// Options of a #[field(...)], #[input(...)] or #[output(...)] attribute
#[derive(Default)]
struct FieldOptions {
    name: Option<String>,
    desc: String,
    kind: Option<LitStr>,
    slot: Option<Type>,
    skip: bool,
}

/// A field to include in the generated declaration
struct DeclaredField {
    name: String,
    desc: String,
    kind: TokenStream2,
    slot: Option<Type>,
    role: Option<Role>,
}

fn parse_field_options(attr: &Attribute, options: &mut FieldOptions) -> syn::Result<()> {
    // Bare `#[input]` carries no options
    if let Meta::Path(_) = attr.meta {
        return Ok(());
    }

    attr.parse_nested_meta(|meta| {
        if meta.path.is_ident("name") {
            let value: LitStr = meta.value()?.parse()?;
            options.name = Some(value.value());
        } else if meta.path.is_ident("desc") {
            let value: LitStr = meta.value()?.parse()?;
            options.desc = value.value();
        } else if meta.path.is_ident("kind") {
            options.kind = Some(meta.value()?.parse()?);
        } else if meta.path.is_ident("slot") {
            options.slot = Some(meta.value()?.parse()?);
        } else if meta.path.is_ident("skip") {
            options.skip = true;
        } else {
            return Err(meta.error("unsupported option, expected name, desc, kind, slot or skip"));
        }
        Ok(())
    })
}

/// Parse the type-level attribute, returning the name override and the flags set
fn parse_type_options(
    attrs: &[Attribute],
    attr_name: &str,
    flags: &[&str],
) -> syn::Result<(Option<String>, Vec<String>)> {
    let mut name = None;
    let mut set_flags = Vec::new();

    for attr in attrs.iter().filter(|a| a.path().is_ident(attr_name)) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("name") {
                let value: LitStr = meta.value()?.parse()?;
                name = Some(value.value());
                return Ok(());
            }
            for flag in flags {
                if meta.path.is_ident(flag) {
                    set_flags.push(flag.to_string());
                    return Ok(());
                }
            }
            Err(meta.error(format!("unsupported #[{attr_name}] option")))
        })?;
    }

    Ok((name, set_flags))
}

/// Map a kind name to its `FieldKind` variant
fn kind_tokens(kind: &str, span: Span) -> syn::Result<TokenStream2> {
    let variant = match kind {
        "Float" => quote! { Float },
        "Int" => quote! { Int },
        "Bool" => quote! { Bool },
        "Str" => quote! { Str },
        "Enum" => quote! { Enum },
        "Array" => quote! { Array },
        "List" => quote! { List },
        "Any" => quote! { Any },
        other => {
            return Err(syn::Error::new(
                span,
                format!("unknown field kind '{other}'"),
            ))
        }
    };
    Ok(quote! { ::fusedwind_core::field::FieldKind::#variant })
}

/// Infer the field kind from the Rust type of the field
fn infer_kind(ty: &Type) -> &'static str {
    match ty {
        Type::Array(_) => "Array",
        Type::Path(path) => {
            let ident = path.path.segments.last().map(|s| s.ident.to_string());
            match ident.as_deref() {
                Some("f32" | "f64" | "FloatValue") => "Float",
                Some(
                    "i8" | "i16" | "i32" | "i64" | "isize" | "u8" | "u16" | "u32" | "u64"
                    | "usize",
                ) => "Int",
                Some("bool") => "Bool",
                Some("String") => "Str",
                Some("Array1" | "Array") => "Array",
                Some("Vec") => "List",
                _ => "Any",
            }
        }
        _ => "Any",
    }
}

fn declared_field(
    rust_name: &syn::Ident,
    ty: &Type,
    options: FieldOptions,
    role: Option<Role>,
) -> syn::Result<DeclaredField> {
    let kind = match &options.kind {
        Some(lit) => kind_tokens(&lit.value(), lit.span())?,
        None => kind_tokens(infer_kind(ty), Span::call_site())?,
    };

    Ok(DeclaredField {
        name: options.name.unwrap_or_else(|| rust_name.to_string()),
        desc: options.desc,
        kind,
        slot: options.slot,
        role,
    })
}

fn named_fields(input: &DeriveInput, derive: &str) -> syn::Result<Vec<syn::Field>> {
    match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => Ok(named.named.iter().cloned().collect()),
            Fields::Unit => Ok(Vec::new()),
            Fields::Unnamed(_) => Err(syn::Error::new_spanned(
                &input.ident,
                format!("{derive} requires named fields"),
            )),
        },
        _ => Err(syn::Error::new_spanned(
            &input.ident,
            format!("{derive} can only be derived for structs"),
        )),
    }
}

/// Generate the field definition expression for a declared field
fn field_expression(field: &DeclaredField) -> TokenStream2 {
    let name = &field.name;
    let desc = &field.desc;
    let kind = &field.kind;

    let definition = match &field.slot {
        Some(ty) => quote! { ::fusedwind_core::interface::interface_instance::<#ty>(#name) },
        None => quote! { ::fusedwind_core::field::FieldDefinition::new(#name, #kind) },
    };
    let role = match field.role {
        Some(Role::Input) => quote! { .as_input() },
        Some(Role::Output) => quote! { .as_output() },
        None => quote! {},
    };

    quote! { #definition.with_description(#desc) #role }
}

fn declared_impl(
    input: &DeriveInput,
    type_name: &str,
    constructor: TokenStream2,
    fields: &[DeclaredField],
) -> TokenStream2 {
    let ident = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();
    let definitions: Vec<TokenStream2> = fields.iter().map(field_expression).collect();

    quote! {
        impl #impl_generics ::fusedwind_core::field::Declared for #ident #ty_generics #where_clause {
            fn declaration() -> ::fusedwind_core::field::TypeDescriptor {
                ::fusedwind_core::field::TypeDescriptor::#constructor(#type_name)
                    #(.field(#definitions))*
            }
        }
    }
}

fn expand_tree_fields(input: DeriveInput) -> syn::Result<TokenStream2> {
    let (name, _) = parse_type_options(&input.attrs, "tree", &[])?;
    let type_name = name.unwrap_or_else(|| input.ident.to_string());

    let mut fields = Vec::new();
    for field in named_fields(&input, "TreeFields")? {
        let mut options = FieldOptions::default();
        for attr in field.attrs.iter().filter(|a| a.path().is_ident("field")) {
            parse_field_options(attr, &mut options)?;
        }
        if options.skip {
            continue;
        }
        let rust_name = field.ident.as_ref().expect("Named fields should have idents");
        fields.push(declared_field(rust_name, &field.ty, options, None)?);
    }

    Ok(declared_impl(
        &input,
        &type_name,
        quote! { variable_tree },
        &fields,
    ))
}

fn expand_component_io(input: DeriveInput) -> syn::Result<TokenStream2> {
    let (name, flags) = parse_type_options(&input.attrs, "component", &["assembly"])?;
    let type_name = name.unwrap_or_else(|| input.ident.to_string());
    let constructor = if flags.iter().any(|f| f == "assembly") {
        quote! { assembly }
    } else {
        quote! { component }
    };

    let mut fields = Vec::new();
    for field in named_fields(&input, "ComponentIO")? {
        let rust_name = field.ident.as_ref().expect("Named fields should have idents");
        for attr in &field.attrs {
            let role = if attr.path().is_ident("input") {
                Role::Input
            } else if attr.path().is_ident("output") {
                Role::Output
            } else {
                continue;
            };
            let mut options = FieldOptions::default();
            parse_field_options(attr, &mut options)?;
            fields.push(declared_field(rust_name, &field.ty, options, Some(role))?);
        }
    }

    let inputs: Vec<&str> = fields
        .iter()
        .filter(|f| f.role == Some(Role::Input))
        .map(|f| f.name.as_str())
        .collect();
    let outputs: Vec<&str> = fields
        .iter()
        .filter(|f| f.role == Some(Role::Output))
        .map(|f| f.name.as_str())
        .collect();

    let declared = declared_impl(&input, &type_name, constructor, &fields);
    let ident = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    Ok(quote! {
        #declared

        impl #impl_generics #ident #ty_generics #where_clause {
            /// Names of the declared inputs
            pub const INPUTS: &'static [&'static str] = &[#(#inputs),*];
            /// Names of the declared outputs
            pub const OUTPUTS: &'static [&'static str] = &[#(#outputs),*];
        }
    })
}

/// Derive macro declaring the fields of a variable tree
///
/// # Attributes
///
/// ## Struct attributes
/// - `#[tree(name = "...")]` - Type name used for the interface (defaults to the struct name)
///
/// ## Field attributes
/// - `#[field(name = "...", desc = "...", kind = "...", slot = Type, skip)]`
#[proc_macro_derive(TreeFields, attributes(tree, field))]
pub fn derive_tree_fields(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand_tree_fields(input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

/// Derive macro declaring the inputs and outputs of a component
///
/// # Attributes
///
/// ## Struct attributes
/// - `#[component(name = "...", assembly)]` - Type name, and whether the type is an assembly
///
/// ## Field attributes
/// - `#[input(name = "...", desc = "...", kind = "...", slot = Type)]` - Mark as input
/// - `#[output(name = "...", desc = "...", kind = "...", slot = Type)]` - Mark as output
///
/// Unmarked fields are parameters and are not declared.
#[proc_macro_derive(ComponentIO, attributes(component, input, output))]
pub fn derive_component_io(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand_component_io(input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
