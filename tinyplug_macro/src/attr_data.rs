// Copyright (c) 2023 Jonathan "Razordor" Alan Thomason
use syn::punctuated::Punctuated;
use syn::{spanned::Spanned, *};

pub struct AttrData {
	pub binder: Option<Ident>,
}

impl TryFrom<Punctuated<Expr, Token!(,)>> for AttrData {
	type Error = syn::Error;
	fn try_from(value: Punctuated<Expr, Token!(,)>) -> Result<Self> {
		let mut binder: Option<Ident> = None;
		let mut errors = vec![];
		const EXPECTED_KW: &str = "Expected `binder`.";

		for expr in value.iter() {
			match expr {
				Expr::Assign(assign) => {
					let (assign_left, assign_right) = (assign.left.as_ref(), assign.right.as_ref());

					let Expr::Path(ExprPath { path, .. }) = assign_left else {
						errors.push(Error::new(assign_left.span(), EXPECTED_KW));
						continue;
					};
					if path.is_ident("binder") {
						// Branch for syntax: #[bindings(binder = <ident>)]
						match assign_right {
							Expr::Path(ExprPath { path, .. }) => match path.get_ident() {
								Some(ident) if binder.is_none() => binder = Some(ident.clone()),
								Some(_) => errors.push(Error::new(
									assign.span(),
									"binder is already defined",
								)),
								None => errors.push(Error::new(path.span(), "Expected identifier.")),
							},
							right => errors.push(Error::new(right.span(), "Expected identifier.")),
						}
					} else {
						errors.push(Error::new(assign_left.span(), EXPECTED_KW));
					}
				}

				// Branch for everything else.
				expr => errors.push(Error::new(expr.span(), EXPECTED_KW)),
			}
		}

		// if there are any errors this will immediately combine and return early.
		if let Some(mut main_err) = errors.pop() {
			for err in errors {
				main_err.combine(err);
			}
			Err(main_err)
		} else {
			Ok(Self { binder })
		}
	}
}
