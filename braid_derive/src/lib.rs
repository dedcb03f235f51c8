extern crate proc_macro;

mod generate;
mod load;
mod model;

use crate::model::DeriveRecord;
use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;

#[proc_macro_derive(FromRecord, attributes(braid))]
pub fn from_record(input: TokenStream) -> TokenStream {
    let derive_input = syn::parse_macro_input!(input as syn::DeriveInput);

    match DeriveRecord::try_from(derive_input) {
        Ok(derive_record) => TokenStream2::from(derive_record).into(),
        Err(error) => error.to_compile_error().into(),
    }
}
