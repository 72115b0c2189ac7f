
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use serde::de::DeserializeOwned;
use url::Url;
use xero_xml::codec::decode;
use xero_xml::entities::contact::Contacts;
use xero_xml::{Error, Getter, Page, PageIterator, Result};

use test_utils::{do_setup, envelope};

/// Serves canned contact pages and records every page it was asked for.
struct FakeGetter {
    pages: Vec<&'static str>,
    requested: Mutex<Vec<u32>>,
    fail_next: AtomicBool,
}

impl FakeGetter {
    fn new(pages: Vec<&'static str>) -> Self {
        Self {
            pages,
            requested: Mutex::new(Vec::new()),
            fail_next: AtomicBool::new(false),
        }
    }

    fn requested(&self) -> Vec<u32> {
        self.requested.lock().unwrap().clone()
    }
}

impl Getter for FakeGetter {
    async fn get<R: DeserializeOwned>(&self, url: Url) -> Result<R> {
        let page: u32 = url
            .query_pairs()
            .find(|(key, _)| key == "page")
            .and_then(|(_, value)| value.parse().ok())
            .unwrap_or(0);
        self.requested.lock().unwrap().push(page);

        if self.fail_next.swap(false, Ordering::SeqCst) {
            return Err(Error::InvalidData("connection reset".to_string()));
        }

        let inner = self
            .pages
            .get(page as usize - 1)
            .copied()
            .unwrap_or("<Contacts/>");
        decode(envelope(inner).as_bytes())
    }
}

const PAGE_ONE: &str = "<Contacts>\
    <Contact><Name>ABC Limited</Name></Contact>\
    <Contact><Name>Bayside Club</Name></Contact>\
    </Contacts>";
const PAGE_TWO: &str = "<Contacts><Contact><Name>City Agency</Name></Contact></Contacts>";

fn root() -> Url {
    Url::parse("https://api.xero.com/api.xro/2.0/Contacts").unwrap()
}

#[tokio::test]
async fn walks_pages_until_an_empty_one() {
    do_setup();
    let getter = FakeGetter::new(vec![PAGE_ONE, PAGE_TWO]);
    let mut names = Vec::new();

    let mut page = PageIterator::<_, Contacts>::new(&getter, root())
        .next()
        .await
        .unwrap();
    while let Page::Records { next, records } = page {
        names.extend(records.into_iter().filter_map(|contact| contact.name));
        page = next.next().await.unwrap();
    }

    assert!(page.is_end());
    assert!(page.records().is_empty());
    assert_eq!(names, ["ABC Limited", "Bayside Club", "City Agency"]);
    assert_eq!(getter.requested(), [1, 2, 3]);
}

#[tokio::test]
async fn empty_first_page_ends_immediately() {
    do_setup();
    let getter = FakeGetter::new(Vec::new());
    let page = PageIterator::<_, Contacts>::new(&getter, root())
        .next()
        .await
        .unwrap();
    assert!(page.is_end());
    assert_eq!(getter.requested(), [1]);
}

#[tokio::test]
async fn failed_page_can_be_retried_from_the_same_cursor() {
    do_setup();
    let getter = FakeGetter::new(vec![PAGE_ONE, PAGE_TWO]);

    let first = PageIterator::<_, Contacts>::new(&getter, root())
        .next()
        .await
        .unwrap();
    let Page::Records { next, records } = first else {
        panic!("expected records on page 1");
    };
    assert_eq!(records.len(), 2);
    assert_eq!(next.page(), 2);

    getter.fail_next.store(true, Ordering::SeqCst);
    let err = next.next().await.unwrap_err();
    assert!(matches!(err, Error::InvalidData(_)), "{err:?}");
    assert_eq!(next.page(), 2);

    let retried = next.next().await.unwrap();
    assert_eq!(retried.records().len(), 1);
    assert_eq!(getter.requested(), [1, 2, 2]);
}

#[test]
fn page_parameter_replaces_any_existing_one() {
    let getter = FakeGetter::new(Vec::new());
    let root =
        Url::parse("https://api.xero.com/api.xro/2.0/Invoices?where=Status%3D%22PAID%22&page=9")
            .unwrap();
    let cursor = PageIterator::<_, Contacts>::new(&getter, root);

    let url = cursor.url();
    let pages: Vec<String> = url
        .query_pairs()
        .filter(|(key, _)| key == "page")
        .map(|(_, value)| value.into_owned())
        .collect();
    assert_eq!(pages, ["1"]);
    assert!(
        url.query_pairs()
            .any(|(key, value)| key == "where" && value == "Status=\"PAID\"")
    );
}
