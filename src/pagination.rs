use std::fmt;
use std::marker::PhantomData;

use url::Url;

use crate::capability::Getter;
use crate::endpoints::set_query_param;
use crate::entities::{Collection, Response};
use crate::error::Result;

/// Cursor over a paginated collection endpoint, e.g. `/BankTransactions`.
///
/// Pages are numbered from 1. Advancing never mutates the cursor: [`next`]
/// hands back a new cursor for the following page, so a failed call can be
/// retried on the same value and re-requests the same page.
///
/// ```ignore
/// let mut page = client.bank_transactions().list().await?;
/// while let Page::Records { next, records } = page {
///     for transaction in records {
///         println!("{:?}", transaction.bank_transaction_id);
///     }
///     page = next.next().await?;
/// }
/// ```
///
/// [`next`]: PageIterator::next
pub struct PageIterator<'a, G, C> {
    getter: &'a G,
    root: Url,
    page: u32,
    collection: PhantomData<fn() -> C>,
}

/// One step of a [`PageIterator`].
pub enum Page<'a, G, C: Collection> {
    Records {
        /// Cursor for the following page
        next: PageIterator<'a, G, C>,
        records: Vec<C::Item>,
    },
    /// The endpoint returned an empty page.
    End,
}

impl<'a, G: Getter, C: Collection> PageIterator<'a, G, C> {
    /// A cursor positioned on page 1 of `root`.
    #[must_use]
    pub fn new(getter: &'a G, root: Url) -> Self {
        Self {
            getter,
            root,
            page: 1,
            collection: PhantomData,
        }
    }

    /// The page the next call to [`PageIterator::next`] requests.
    #[must_use]
    pub fn page(&self) -> u32 {
        self.page
    }

    /// The URL of the current page.
    #[must_use]
    pub fn url(&self) -> Url {
        let mut url = self.root.clone();
        set_query_param(&mut url, "page", &self.page.to_string());
        url
    }

    #[instrument(skip(self), fields(page = self.page, element = C::ELEMENT))]
    pub async fn next(&self) -> Result<Page<'a, G, C>> {
        let response: Response<C> = self.getter.get(self.url()).await?;
        if response.is_empty() {
            debug!("reached the last page");
            return Ok(Page::End);
        }

        let records = response.into_items();
        trace!(count = records.len(), "received page");
        Ok(Page::Records {
            next: Self {
                page: self.page + 1,
                ..self.clone()
            },
            records,
        })
    }
}

impl<G, C: Collection> Page<'_, G, C> {
    #[must_use]
    pub fn is_end(&self) -> bool {
        matches!(self, Self::End)
    }

    /// Records of this page; empty at the end.
    #[must_use]
    pub fn records(&self) -> &[C::Item] {
        match self {
            Self::Records { records, .. } => records,
            Self::End => &[],
        }
    }
}

impl<G, C> Clone for PageIterator<'_, G, C> {
    fn clone(&self) -> Self {
        Self {
            getter: self.getter,
            root: self.root.clone(),
            page: self.page,
            collection: PhantomData,
        }
    }
}

impl<G, C> fmt::Debug for PageIterator<'_, G, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PageIterator")
            .field("root", &self.root.as_str())
            .field("page", &self.page)
            .finish_non_exhaustive()
    }
}

impl<G, C> fmt::Debug for Page<'_, G, C>
where
    C: Collection,
    C::Item: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Records { next, records } => f
                .debug_struct("Records")
                .field("next", next)
                .field("records", records)
                .finish(),
            Self::End => f.write_str("End"),
        }
    }
}
