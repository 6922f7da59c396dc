//! Detail page: one posting per identifier, four independent field lookups.

use common::{Field, JobRecord};
use reqwest::blocking::Client;
use reqwest::Url;
use scraper::{ElementRef, Html};
use tracing::debug;

use crate::error::{Result, ScrapeError};
use crate::http::get_text;
use crate::listing::selector;

/// A tag name plus the exact value of its `class` attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Locator {
    pub tag: &'static str,
    pub class: &'static str,
}

pub const JOB_TITLE: Locator = Locator {
    tag: "h2",
    class: "top-card-layout__title font-sans text-lg papabear:text-xl font-bold leading-open text-color-text mb-0 topcard__title",
};

pub const COMPANY_NAME: Locator = Locator {
    tag: "a",
    class: "topcard__org-name-link topcard__flavor--black-link",
};

pub const TIME_POSTED: Locator = Locator {
    tag: "span",
    class: "posted-time-ago__text topcard__flavor--metadata",
};

pub const NUMBER_APPLICANTS: Locator = Locator {
    tag: "span",
    class: "num-applicants__caption topcard__flavor--metadata topcard__flavor--bullet",
};

impl Locator {
    // Class lists are compared token by token, so line breaks and repeated
    // spaces inside the attribute do not matter. Token order does.
    fn matches(&self, element: &ElementRef<'_>) -> bool {
        element
            .value()
            .attr("class")
            .is_some_and(|class| class.split_whitespace().eq(self.class.split_whitespace()))
    }

    /// Trimmed text of the first matching element.
    pub fn find_text(&self, document: &Html) -> Field {
        let Ok(tag_selector) = selector(self.tag) else {
            return Field::Absent;
        };

        document
            .select(&tag_selector)
            .find(|element| self.matches(element))
            .map(|element| element.text().collect::<String>().trim().to_string())
            .into()
    }
}

/// `{base}/{job_id}` with the identifier escaped as a single path segment.
pub fn detail_url(base: &str, job_id: &str) -> Result<Url> {
    let invalid = |reason: String| ScrapeError::Url {
        url: base.to_string(),
        reason,
    };

    let mut url = Url::parse(base).map_err(|e| invalid(e.to_string()))?;
    url.path_segments_mut()
        .map_err(|_| invalid("URL cannot take path segments".to_string()))?
        .pop_if_empty()
        .push(job_id);
    Ok(url)
}

/// Builds a record from an already parsed detail page. Never fails: a field
/// whose locator finds nothing is [`Field::Absent`].
pub fn extract_record(job_id: &str, document: &Html) -> JobRecord {
    JobRecord {
        job_id: job_id.to_string(),
        job_title: JOB_TITLE.find_text(document),
        company_name: COMPANY_NAME.find_text(document),
        time_posted: TIME_POSTED.find_text(document),
        number_applicants: NUMBER_APPLICANTS.find_text(document),
    }
}

pub fn fetch_detail(client: &Client, base: &str, job_id: &str) -> Result<JobRecord> {
    let url = detail_url(base, job_id)?;
    let body = get_text(client, url.as_str())?;
    let document = Html::parse_document(&body);

    let record = extract_record(job_id, &document);
    let missing = record.missing_fields();
    if !missing.is_empty() {
        debug!("Posting {} has no {}", job_id, missing.join(", "));
    }
    Ok(record)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn detail_page(
        title: Option<&str>,
        company: Option<&str>,
        posted: Option<&str>,
        applicants: Option<&str>,
    ) -> String {
        let mut body = String::from(r#"<html><body><section class="top-card-layout">"#);
        if let Some(title) = title {
            let class = JOB_TITLE.class;
            body.push_str(&format!("<h2 class=\"{class}\">\n      {title}\n    </h2>"));
        }
        if let Some(company) = company {
            let class = COMPANY_NAME.class;
            body.push_str(&format!("<a class=\"{class}\" href=\"/company/x\">\n  {company}  </a>"));
        }
        if let Some(posted) = posted {
            let class = TIME_POSTED.class;
            body.push_str(&format!("<span class=\"{class}\">  {posted} </span>"));
        }
        if let Some(applicants) = applicants {
            let class = NUMBER_APPLICANTS.class;
            body.push_str(&format!("<span class=\"{class}\">\n{applicants}\n</span>"));
        }
        body.push_str("</section></body></html>");
        body
    }

    #[test]
    fn test_all_fields_present_and_trimmed() {
        let html = detail_page(
            Some("Senior Python Developer"),
            Some("Acme Corp"),
            Some("2 days ago"),
            Some("Over 200 applicants"),
        );
        let record = extract_record("111", &Html::parse_document(&html));

        assert_eq!(record.job_id, "111");
        assert_eq!(record.job_title, Field::Present("Senior Python Developer".to_string()));
        assert_eq!(record.company_name, Field::Present("Acme Corp".to_string()));
        assert_eq!(record.time_posted, Field::Present("2 days ago".to_string()));
        assert_eq!(record.number_applicants, Field::Present("Over 200 applicants".to_string()));
        assert!(record.missing_fields().is_empty());
    }

    #[test]
    fn test_missing_locators_do_not_affect_other_fields() {
        let html = detail_page(Some("X"), Some("Y"), None, None);
        let record = extract_record("111", &Html::parse_document(&html));

        assert_eq!(record.job_title, Field::Present("X".to_string()));
        assert_eq!(record.company_name, Field::Present("Y".to_string()));
        assert_eq!(record.time_posted, Field::Absent);
        assert_eq!(record.number_applicants, Field::Absent);
    }

    #[test]
    fn test_class_must_match_exactly() {
        let html = r#"<span class="posted-time-ago__text">3 weeks ago</span>
            <span class="posted-time-ago__text topcard__flavor--metadata extra">1 week ago</span>"#;
        let document = Html::parse_document(html);
        assert_eq!(TIME_POSTED.find_text(&document), Field::Absent);
    }

    #[test]
    fn test_first_match_wins() {
        let html = format!(
            r#"<span class="{0}">first</span><span class="{0}">second</span>"#,
            TIME_POSTED.class
        );
        let document = Html::parse_document(&html);
        assert_eq!(TIME_POSTED.find_text(&document), Field::Present("first".to_string()));
    }

    #[test]
    fn test_applicants_span_not_confused_with_time_posted() {
        let html = detail_page(None, None, None, Some("25 applicants"));
        let record = extract_record("9", &Html::parse_document(&html));
        assert_eq!(record.time_posted, Field::Absent);
        assert_eq!(record.number_applicants, Field::Present("25 applicants".to_string()));
    }

    #[test]
    fn test_empty_document() {
        let record = extract_record("7", &Html::parse_document(""));
        assert_eq!(record.missing_fields().len(), 4);
    }

    #[test]
    fn test_detail_url() {
        let url = detail_url("https://example.com/jobPosting/", "42").unwrap();
        assert_eq!(url.as_str(), "https://example.com/jobPosting/42");

        let url = detail_url("https://example.com/jobPosting", "42").unwrap();
        assert_eq!(url.as_str(), "https://example.com/jobPosting/42");
    }

    #[test]
    fn test_detail_url_escapes_identifier() {
        let url = detail_url("https://example.com/jobPosting", "1/../x?y#z").unwrap();
        assert_eq!(url.as_str(), "https://example.com/jobPosting/1%2F..%2Fx%3Fy%23z");
        assert_eq!(url.path_segments().unwrap().count(), 2);
        assert!(url.query().is_none());
        assert!(url.fragment().is_none());
    }

    #[test]
    fn test_detail_url_rejects_bad_base() {
        assert!(matches!(detail_url("not a url", "42"), Err(ScrapeError::Url { .. })));
    }
}
