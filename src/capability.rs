//! Small capability traits over the request pipeline.
//!
//! [`crate::Client`] implements all three. Code that only needs to read, such
//! as [`crate::pagination::PageIterator`], takes a [`Getter`] so it can be
//! driven by a test double.

use std::future::Future;

use serde::de::DeserializeOwned;
use url::Url;

use crate::codec::Encode;
use crate::error::Result;

pub trait Getter: Sync {
    /// `GET` `url` and decode the 200 body.
    fn get<R: DeserializeOwned>(&self, url: Url) -> impl Future<Output = Result<R>> + Send;
}

pub trait Poster: Sync {
    /// `POST` the encoded `payload` to `url` and decode the 200 body.
    fn post<R, P>(&self, url: Url, payload: &P) -> impl Future<Output = Result<R>> + Send
    where
        R: DeserializeOwned,
        P: Encode + Sync + ?Sized;
}

pub trait Putter: Sync {
    /// `PUT` the encoded `payload` to `url` and decode the 200 body.
    fn put<R, P>(&self, url: Url, payload: &P) -> impl Future<Output = Result<R>> + Send
    where
        R: DeserializeOwned,
        P: Encode + Sync + ?Sized;
}
