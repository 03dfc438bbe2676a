//! URL helpers for paginated listing pages

use url::Url;

/// Builds the URL of one results page of a category
///
/// Appends `page=<n>` to the base URL's query, keeping any existing query
/// pairs and replacing a `page` pair already present.
///
/// # Examples
///
/// ```
/// use coinafrique_harvest::url::page_url;
/// use url::Url;
///
/// let base = Url::parse("https://sn.coinafrique.com/categorie/moutons").unwrap();
/// assert_eq!(
///     page_url(&base, 3).as_str(),
///     "https://sn.coinafrique.com/categorie/moutons?page=3"
/// );
/// ```
pub fn page_url(base_url: &Url, page: u32) -> Url {
    let retained: Vec<(String, String)> = base_url
        .query_pairs()
        .filter(|(key, _)| key != "page")
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();

    let mut url = base_url.clone();
    url.set_query(None);
    {
        let mut pairs = url.query_pairs_mut();
        for (key, value) in &retained {
            pairs.append_pair(key, value);
        }
        pairs.append_pair("page", &page.to_string());
    }
    url
}
