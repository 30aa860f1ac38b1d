//! Search provider XML response parsing.
//!
//! The provider answers with a result set document:
//!
//! ```xml
//! <ResultSet totalResultsReturned="2">
//!   <Result><Title>..</Title><Url>http://a.example/x.pdf</Url></Result>
//!   <Result><Title>..</Title><Url>http://b.example/y.txt</Url></Result>
//! </ResultSet>
//! ```
//!
//! Every `Result` element, at any depth, contributes the text of its first
//! direct `Url` child.

use quick_xml::events::Event;
use quick_xml::Reader;

use super::SearchError;

const RESULT_TAG: &str = "Result";
const URL_TAG: &str = "Url";

/// Extract result URLs from a provider response, in document order.
///
/// `Result` elements without a usable `Url` are skipped. Malformed XML is a
/// parse error; a document with no `Result` elements yields an empty list.
pub fn parse_result_urls(xml: &str) -> Result<Vec<String>, SearchError> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    let mut urls = Vec::new();
    // Open element names, innermost last.
    let mut path: Vec<String> = Vec::new();
    // One slot per open Result element holding its first Url, if seen yet.
    let mut open_results: Vec<Option<String>> = Vec::new();
    let mut capturing = false;
    let mut text = String::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => {
                let name = String::from_utf8_lossy(e.local_name().as_ref()).into_owned();
                if name == URL_TAG
                    && path.last().map(String::as_str) == Some(RESULT_TAG)
                    && matches!(open_results.last(), Some(None))
                {
                    capturing = true;
                    text.clear();
                }
                if name == RESULT_TAG {
                    open_results.push(None);
                }
                path.push(name);
            }
            Ok(Event::End(ref e)) => {
                let name = String::from_utf8_lossy(e.local_name().as_ref()).into_owned();
                path.pop();
                if capturing && name == URL_TAG {
                    capturing = false;
                    if let Some(slot) = open_results.last_mut() {
                        *slot = Some(text.trim().to_string());
                    }
                } else if name == RESULT_TAG {
                    if let Some(Some(url)) = open_results.pop() {
                        if !url.is_empty() {
                            urls.push(url);
                        }
                    }
                }
            }
            Ok(Event::Text(e)) if capturing => {
                let unescaped = e
                    .unescape()
                    .map_err(|err| SearchError::Parse(err.to_string()))?;
                text.push_str(&unescaped);
            }
            Ok(Event::CData(e)) if capturing => {
                text.push_str(&String::from_utf8_lossy(&e.into_inner()));
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(SearchError::Parse(format!(
                    "at position {}: {}",
                    reader.buffer_position(),
                    e
                )));
            }
            _ => {}
        }
    }

    Ok(urls)
}
