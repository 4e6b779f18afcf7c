// Copyright (c) 2023 Jonathan "Razordor" Alan Thomason
use quote::*;

use proc_macro::TokenStream as TokenStream1;
use proc_macro2::{Span, TokenStream as TokenStream2};
use syn::{parse::Parser, punctuated::Punctuated, spanned::Spanned, Expr, Ident, Token};

mod attr_data;
use attr_data::*;

/// Generates a typed wrapper per function declared in an `extern "C"` block.
///
/// Each `fn name(args..) -> R` becomes
/// `unsafe fn name<L: Loader>(plugin: &Plugin<L>, args..) -> tinyplug::Result<R>`,
/// which calls the symbol through `Plugin::invoke`. `#[link_name = "..."]` picks a
/// different symbol name than the function name.
///
/// With `binder = ident`, an additional `fn ident<L: Loader>(plugin: &mut Plugin<L>)`
/// binds every declared symbol with its signature, so a wrapper and the function
/// behind it can never disagree silently. The binder takes the visibility of the
/// first declared function.
#[proc_macro_attribute]
pub fn bindings(args: TokenStream1, input: TokenStream1) -> TokenStream1 {
    let args = TokenStream2::from(args);
    let input = TokenStream2::from(input);
    let foreign_mod = match syn::parse2::<syn::ItemForeignMod>(input) {
        Ok(foreign_mod) => foreign_mod,
        Err(e) => return e.into_compile_error().into(),
    };

    let punct = match Parser::parse2(Punctuated::<Expr, Token!(,)>::parse_terminated, args) {
        Ok(punct) => punct,
        Err(e) => return e.into_compile_error().into(),
    };
    let binder = match AttrData::try_from(punct) {
        Ok(attr) => attr.binder,
        Err(e) => {
            return syn::Error::into_compile_error(e).into();
        }
    };

    if let Some(name) = &foreign_mod.abi.name {
        if name.value() != "C" {
            return syn::Error::new(name.span(), "only `extern \"C\"` blocks are supported")
                .into_compile_error()
                .into();
        }
    }

    let mut ret = TokenStream2::new();
    let mut bind_calls = Vec::new();
    // the binder is as visible as the first function it binds
    let mut binder_vis = None;
    for item in foreign_mod.items {
        use syn::ForeignItem;
        match item {
            ForeignItem::Fn(fn_item) => {
                binder_vis.get_or_insert_with(|| fn_item.vis.clone());
                match parse_fn(fn_item) {
                    Ok((wrapper, bind_call)) => {
                        ret.extend(wrapper);
                        bind_calls.push(bind_call);
                    }
                    Err(e) => ret.extend(e.into_compile_error()),
                }
            }
            other => ret.extend(
                syn::Error::new(
                    other.span(),
                    "only functions are supported, bind data with `Plugin::bind_variable`",
                )
                .into_compile_error(),
            ),
        }
    }
    if let Some(binder) = binder {
        let vis = binder_vis.unwrap_or(syn::Visibility::Inherited);
        ret.extend(binder_fn(&vis, &binder, &bind_calls));
    }
    TokenStream1::from(ret)
}

fn link_name(fn_item: &mut syn::ForeignItemFn) -> syn::Result<Option<syn::LitStr>> {
    let mut link_name = None;
    let mut kept = Vec::with_capacity(fn_item.attrs.len());
    for attr in fn_item.attrs.drain(..) {
        if !attr.path().is_ident("link_name") {
            kept.push(attr);
            continue;
        }
        match &attr.meta {
            syn::Meta::NameValue(syn::MetaNameValue {
                value: Expr::Lit(syn::ExprLit { lit: syn::Lit::Str(val), .. }),
                ..
            }) if link_name.is_none() => link_name = Some(val.clone()),
            syn::Meta::NameValue(_) if link_name.is_some() => {
                return Err(syn::Error::new(attr.span(), "link_name is already defined"))
            }
            _ => return Err(syn::Error::new(attr.span(), "Expected `link_name = \"<symbol>\"`.")),
        }
    }
    fn_item.attrs = kept;
    Ok(link_name)
}

fn parse_fn(mut fn_item: syn::ForeignItemFn) -> syn::Result<(TokenStream2, TokenStream2)> {
    let symbol = match link_name(&mut fn_item)? {
        Some(name) => name,
        None => syn::LitStr::new(&fn_item.sig.ident.to_string(), fn_item.sig.ident.span()),
    };
    if let Some(variadic) = &fn_item.sig.variadic {
        return Err(syn::Error::new(variadic.span(), "variadic functions are unsupported"));
    }
    if !fn_item.sig.generics.params.is_empty() {
        return Err(syn::Error::new(
            fn_item.sig.generics.span(),
            "generic functions are unsupported",
        ));
    }

    let fn_name = &fn_item.sig.ident;
    let vis = &fn_item.vis;
    let fn_attrs = &fn_item.attrs;
    let output = &fn_item.sig.output;
    let ret_ty = match output {
        syn::ReturnType::Default => quote!(()),
        syn::ReturnType::Type(_, ty) => ty.to_token_stream(),
    };

    let mut param_list = Vec::new();
    let mut param_ty_list = Vec::new();
    let mut ty_list = Vec::new();
    for (i, arg) in fn_item.sig.inputs.iter().enumerate() {
        match arg {
            syn::FnArg::Typed(pat_type) => {
                let ty = pat_type.ty.to_token_stream();
                let param_name = match pat_type.pat.as_ref() {
                    syn::Pat::Wild(_) => format_ident!("p{i}").into_token_stream(),
                    syn::Pat::Ident(pat_id) => pat_id.ident.to_token_stream(),
                    other => {
                        return Err(syn::Error::new(other.span(), "Expected identifier or `_`."))
                    }
                };
                param_list.push(param_name.clone());
                param_ty_list.push(quote!(#param_name : #ty));
                ty_list.push(ty);
            }
            syn::FnArg::Receiver(rec) => {
                return Err(syn::Error::new(rec.span(), "`self` arguments are unsupported"));
            }
        }
    }

    // mixed-site so a parameter the user named `plugin` cannot collide with it
    let plugin = Ident::new("plugin", Span::mixed_site());
    let loader = loader_ident();
    let fn_ty = quote!(unsafe extern "C" fn(#(#ty_list),*) #output);

    let wrapper = quote! {
        #(#fn_attrs)*
        #[allow(non_snake_case)]
        #[inline]
        #vis unsafe fn #fn_name<#loader: ::tinyplug::Loader>(
            #plugin: &::tinyplug::Plugin<#loader>,
            #(#param_ty_list),*
        ) -> ::tinyplug::Result<#ret_ty> {
            #plugin.invoke::<#fn_ty>(#symbol, (#(#param_list,)*))
        }
    };
    let bind_call = quote!((#symbol, #plugin.bind_as::<#fn_ty>(#symbol)));
    Ok((wrapper, bind_call))
}

// type parameters are not hygienic, so the name must not clash with user types
fn loader_ident() -> Ident {
    Ident::new("__TinyplugLoader", Span::mixed_site())
}

fn binder_fn(vis: &syn::Visibility, binder: &Ident, bind_calls: &[TokenStream2]) -> TokenStream2 {
    let plugin = Ident::new("plugin", Span::mixed_site());
    let loader = loader_ident();
    quote! {
        /// Binds every function declared alongside this binder with its signature.
        ///
        /// Returns how many were bound, or every name that failed.
        #vis fn #binder<#loader: ::tinyplug::Loader>(
            #plugin: &mut ::tinyplug::Plugin<#loader>,
        ) -> ::core::result::Result<usize, ::tinyplug::BindFailures> {
            let mut bound = 0usize;
            let mut failed = ::std::vec::Vec::new();
            #(
                match #bind_calls {
                    (_, ::core::result::Result::Ok(())) => bound += 1,
                    (name, ::core::result::Result::Err(err)) => failed.push((::std::string::String::from(name), err)),
                }
            )*
            if failed.is_empty() {
                ::core::result::Result::Ok(bound)
            } else {
                ::core::result::Result::Err(::tinyplug::BindFailures::from(failed))
            }
        }
    }
}
