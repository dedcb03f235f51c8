use crate::model::{DeriveField, DeriveRecord, DeriveValue};
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;

impl From<DeriveField> for TokenStream2 {
    fn from(value: DeriveField) -> Self {
        let DeriveField {
            field_name,
            field_type: DeriveValue { tokens: field_type },
            record_field: DeriveValue {
                tokens: record_field,
            },
        } = value;

        quote! {
            #field_name: record.remove::<#field_type>(#record_field)?,
        }
    }
}

impl From<DeriveRecord> for TokenStream2 {
    fn from(value: DeriveRecord) -> Self {
        let DeriveRecord {
            struct_name,
            fields,
        } = value;
        let fields: Vec<TokenStream2> = fields.into_iter().map(TokenStream2::from).collect();
        let binding = if fields.is_empty() {
            quote! { _record }
        } else {
            quote! { mut record }
        };

        quote! {
            impl ::braid::prelude::FromRecord for #struct_name {
                fn from_record(#binding: ::braid::Record) -> ::std::result::Result<Self, ::braid::RecordError> {
                    ::std::result::Result::Ok(Self {
                        #( #fields )*
                    })
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proc_macro2::Span;

    #[test]
    fn render_record_empty() {
        // Setup
        let record = DeriveRecord {
            struct_name: ident("MyStruct"),
            fields: vec![],
        };

        // Execute
        let token_stream = TokenStream2::from(record);

        // Verify
        assert_eq!(
            simple_format(token_stream.to_string()),
            r#"impl :: braid :: prelude :: FromRecord for MyStruct {
 fn from_record (_record : :: braid :: Record) -> :: std :: result :: Result < Self , :: braid :: RecordError > {
 :: std :: result :: Result :: Ok (Self {
 }
) }
 }
"#,
        );
    }

    #[test]
    fn render_record() {
        // Setup
        let record = DeriveRecord {
            struct_name: ident("MyStruct"),
            fields: vec![
                DeriveField {
                    field_name: ident("width"),
                    field_type: DeriveValue {
                        tokens: quote! { u32 },
                    },
                    record_field: DeriveValue {
                        tokens: quote! { "width" },
                    },
                },
                DeriveField {
                    field_name: ident("out_dir"),
                    field_type: DeriveValue {
                        tokens: quote! { Option<String> },
                    },
                    record_field: DeriveValue {
                        tokens: quote! { "out-dir" },
                    },
                },
            ],
        };

        // Execute
        let token_stream = TokenStream2::from(record);

        // Verify
        assert_eq!(
            simple_format(token_stream.to_string()),
            r#"impl :: braid :: prelude :: FromRecord for MyStruct {
 fn from_record (mut record : :: braid :: Record) -> :: std :: result :: Result < Self , :: braid :: RecordError > {
 :: std :: result :: Result :: Ok (Self {
 width : record . remove :: < u32 > ("width") ? , out_dir : record . remove :: < Option < String > > ("out-dir") ? , }
) }
 }
"#,
        );
    }

    fn ident(name: &str) -> syn::Ident {
        syn::Ident::new(name, Span::call_site())
    }

    fn simple_format(rust_str: String) -> String {
        rust_str
            .replace("{", "{\n")
            .replace("}", "}\n")
            .replace(";", ";\n")
    }
}
