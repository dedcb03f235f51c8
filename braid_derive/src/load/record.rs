use crate::load::invalid_error;
use crate::model::{DeriveField, DeriveRecord, DeriveValue, IntermediateAttributes};
use proc_macro2::Literal;
use quote::ToTokens;
use syn::ext::IdentExt;
use syn::spanned::Spanned;

const FIELD_KEY: &str = "field";

impl TryFrom<syn::DeriveInput> for DeriveRecord {
    type Error = syn::Error;

    fn try_from(value: syn::DeriveInput) -> Result<Self, Self::Error> {
        if !value.generics.params.is_empty() {
            return Err(invalid_error(
                value.generics.span(),
                "FromRecord cannot be derived for a generic struct.",
            ));
        }

        let struct_name = value.ident.clone();
        let fields = match value.data {
            syn::Data::Struct(syn::DataStruct {
                fields: syn::Fields::Named(named),
                ..
            }) => named
                .named
                .iter()
                .map(DeriveField::try_from)
                .collect::<Result<Vec<_>, _>>()?,
            _ => {
                return Err(invalid_error(
                    struct_name.span(),
                    "FromRecord may only be derived for a struct with named fields.",
                ));
            }
        };

        Ok(Self {
            struct_name,
            fields,
        })
    }
}

impl TryFrom<&syn::Field> for DeriveField {
    type Error = syn::Error;

    fn try_from(value: &syn::Field) -> Result<Self, Self::Error> {
        let field_name = value
            .ident
            .clone()
            .ok_or_else(|| invalid_error(value.span(), "field must be named."))?;
        let mut record_field = None;

        for attribute in value.attrs.iter().filter(|a| a.path().is_ident("braid")) {
            let IntermediateAttributes {
                singletons,
                mut pairs,
            } = IntermediateAttributes::try_from(attribute)?;

            if let Some(singleton) = singletons.into_iter().next() {
                return Err(invalid_error(
                    attribute.span(),
                    format!("unknown attribute '{singleton}'."),
                ));
            }

            if let Some(mut values) = pairs.remove(FIELD_KEY) {
                if values.len() > 1 || record_field.is_some() {
                    return Err(invalid_error(
                        attribute.span(),
                        format!("attribute '{FIELD_KEY}' may only be specified once."),
                    ));
                }

                record_field = values.pop();
            }

            if let Some(key) = pairs.keys().next() {
                return Err(invalid_error(
                    attribute.span(),
                    format!("unknown attribute '{key}'."),
                ));
            }
        }

        let record_field = record_field.unwrap_or_else(|| DeriveValue {
            tokens: Literal::string(&field_name.unraw().to_string()).into_token_stream(),
        });

        Ok(Self {
            field_name,
            field_type: DeriveValue {
                tokens: value.ty.to_token_stream(),
            },
            record_field,
        })
    }
}
