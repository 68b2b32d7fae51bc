//! Offering name assembly
//!
//! [`NameBuilder`] turns a parent offering template plus the per-combination
//! inputs (kind, app, schedule, receiver) into the display name of a new
//! child offering. There is one assembly branch per [`Convention`]; all of
//! them share the parsed [`ParentTemplate`], the country table and the
//! "Prod" suppression rule, and every result goes through
//! [`ensure_incident_naming`].

use super::convention::{Convention, Division, ServiceKind};
use super::countries::CountryTable;
use super::incident::ensure_incident_naming;
use super::template::ParentTemplate;

/// Words that suppress the `Prod` token when found anywhere in the name
const NO_PROD_KEYWORDS: &[&str] = &["hardware", "mailbox", "network", "mobile", "security"];

/// Extra suppression word for level 2 names
const LVL2_NO_PROD_KEYWORD: &str = "microsoft";

const DEFAULT_TOPIC: &str = "Software";

/// Inputs for one generated name
#[derive(Debug, Clone, Copy)]
pub struct NameRequest<'a> {
    pub parent_offering: &'a str,
    pub kind: ServiceKind,
    pub app: Option<&'a str>,
    pub schedule: &'a str,
    /// Receiving party such as `HS DE`; may be empty
    pub receiver: &'a str,
    /// Delivering party tag for CORP conventions; may be empty
    pub delivering: &'a str,
}

impl<'a> NameRequest<'a> {
    pub fn new(parent_offering: &'a str, kind: ServiceKind, schedule: &'a str) -> Self {
        NameRequest {
            parent_offering,
            kind,
            app: None,
            schedule,
            receiver: "",
            delivering: "",
        }
    }

    pub fn with_app(mut self, app: Option<&'a str>) -> Self {
        self.app = app.filter(|a| !a.trim().is_empty());
        self
    }

    pub fn with_receiver(mut self, receiver: &'a str) -> Self {
        self.receiver = receiver;
        self
    }

    pub fn with_delivering(mut self, delivering: &'a str) -> Self {
        self.delivering = delivering;
        self
    }
}

/// Builds offering names for one naming convention
#[derive(Debug, Clone)]
pub struct NameBuilder<'a> {
    convention: Convention,
    countries: &'a CountryTable,
    add_prod: bool,
}

/// Token accumulator that drops empty fragments
#[derive(Default)]
struct Parts(Vec<String>);

impl Parts {
    fn push(&mut self, part: impl Into<String>) {
        let part = part.into();
        let trimmed = part.trim();
        if !trimmed.is_empty() {
            self.0.push(trimmed.to_string());
        }
    }

    fn extend<I, S>(&mut self, parts: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for part in parts {
            self.push(part);
        }
    }

    fn join(&self) -> String {
        self.0.join(" ")
    }

    fn bracketed(&self) -> String {
        format!("[{}]", self.join())
    }
}

/// Prefix `topic` to the lowercased catalog text unless the catalog
/// already opens with the same whole words
fn join_topic(topic: &str, catalog: &str) -> String {
    if catalog.is_empty() {
        return topic.to_string();
    }
    let catalog_lower = catalog.to_lowercase();
    let topic_lower = topic.to_lowercase();
    let mut catalog_words = catalog_lower.split_whitespace();
    let repeated = topic_lower
        .split_whitespace()
        .all(|word| catalog_words.next() == Some(word));

    if repeated {
        catalog.to_string()
    } else {
        format!("{} {}", topic, catalog_lower)
    }
}

impl<'a> NameBuilder<'a> {
    pub fn new(convention: Convention, countries: &'a CountryTable) -> Self {
        NameBuilder {
            convention,
            countries,
            add_prod: true,
        }
    }

    pub fn with_prod(mut self, add_prod: bool) -> Self {
        self.add_prod = add_prod;
        self
    }

    /// Build a level 1 name for the active convention
    pub fn build(&self, req: &NameRequest<'_>) -> String {
        let template = ParentTemplate::parse(req.parent_offering);
        log::trace!("Parsed parent template {:?}", template);

        let name = match self.convention {
            Convention::Standard => self.standard(&template, req),
            Convention::It => self.it(&template, req),
            Convention::Hr => self.hr(&template, req),
            Convention::Medical => self.medical(&template, req),
            Convention::Dak => self.dak(&template, req),
            Convention::Corp => self.corp(&template, req),
            Convention::CorpRecp => self.corp_recp(&template, req),
            Convention::CorpIt => self.corp_it(&template, req),
            Convention::CorpDedicated => self.corp_dedicated(&template, req),
        };

        ensure_incident_naming(&name)
    }

    /// Build a level 2 name
    ///
    /// Level 2 names ignore the convention: `[kind div cc dept] catalog app
    /// Prod service_type schedule`, with the kind taken from the template
    /// when it carries one.
    pub fn build_lvl2(&self, req: &NameRequest<'_>, service_type: &str) -> String {
        let template = ParentTemplate::parse(req.parent_offering);
        let country = template.country();

        let division = self
            .countries
            .forced_division(country)
            .or(template.division)
            .unwrap_or(Division::Hs);

        let mut prefix = Parts::default();
        prefix.push(template.kind.unwrap_or(req.kind).as_str());
        prefix.push(division.as_str());
        prefix.push(country);
        if let Some(dept) = &template.department {
            prefix.push(dept.as_str());
        }

        let mut body = Parts::default();
        body.push(prefix.bracketed());
        body.push(template.catalog.as_str());
        if let Some(app) = req.app {
            body.push(app);
        }

        let mut tail = Parts::default();
        tail.push(service_type);
        tail.push(req.schedule);

        let name = self.with_optional_prod(body, tail, req.parent_offering, true);
        ensure_incident_naming(&name)
    }

    /// Division for non-CORP prefixes; `None` when nothing determines it
    fn resolved_division(&self, template: &ParentTemplate, req: &NameRequest<'_>) -> Option<Division> {
        let country = template.country();
        if let Some(forced) = self.countries.forced_division(country) {
            return Some(forced);
        }
        if self.countries.uses_receiver_division(country) {
            if let Some(division) = Division::from_tag(req.receiver) {
                return Some(division);
            }
        }
        template.division.or_else(|| Division::from_tag(req.delivering))
    }

    /// Division of the delivering party in CORP prefixes
    fn delivering_division(&self, template: &ParentTemplate, req: &NameRequest<'_>) -> Division {
        self.countries
            .forced_division(template.country())
            .or(template.division)
            .or_else(|| Division::from_tag(req.delivering))
            .unwrap_or(Division::Hs)
    }

    /// `<div> <cc>` of the delivering party
    ///
    /// DS-only countries always render `DS <cc>`; otherwise the delivering
    /// tag is used (first `limit` tokens when given), else the template's
    /// own division and country.
    fn delivering_part(
        &self,
        template: &ParentTemplate,
        req: &NameRequest<'_>,
        limit: Option<usize>,
    ) -> Vec<String> {
        let country = template.country();
        if self.countries.is_ds_only(country) {
            return vec![Division::Ds.to_string(), country.to_string()];
        }

        let tokens: Vec<String> = req.delivering.split_whitespace().map(String::from).collect();
        if !tokens.is_empty() {
            let take = limit.unwrap_or(tokens.len());
            return tokens.into_iter().take(take).collect();
        }

        vec![
            self.delivering_division(template, req).to_string(),
            country.to_string(),
        ]
    }

    /// Append `Prod` to `body` unless suppressed, then `tail`
    fn with_optional_prod(&self, body: Parts, tail: Parts, parent_offering: &str, lvl2: bool) -> String {
        let mut parts = body;

        let haystack = format!("{} {} {}", parts.join(), tail.join(), parent_offering).to_lowercase();
        let suppressed = NO_PROD_KEYWORDS.iter().any(|k| haystack.contains(k))
            || (lvl2 && haystack.contains(LVL2_NO_PROD_KEYWORD));

        if self.add_prod && !suppressed {
            parts.push("Prod");
        }
        parts.extend(tail.0);
        parts.join()
    }

    fn solving(req: &NameRequest<'_>) -> Option<&'static str> {
        match req.kind {
            ServiceKind::Im => Some("solving"),
            ServiceKind::Sr => None,
        }
    }

    fn standard(&self, t: &ParentTemplate, req: &NameRequest<'_>) -> String {
        let mut prefix = Parts::default();
        prefix.push(req.kind.as_str());
        prefix.push(self.resolved_division(t, req).unwrap_or(Division::Hs).as_str());
        prefix.push(t.country());
        prefix.extend(t.topic.iter().cloned());
        match &t.department {
            Some(dept) => prefix.push(dept.as_str()),
            None if t.has_recp() => prefix.push("IT"),
            None => {}
        }

        let mut body = Parts::default();
        body.push(prefix.bracketed());
        body.push(t.catalog.as_str());
        body.extend(req.app);
        body.extend(Self::solving(req));

        let mut tail = Parts::default();
        tail.push(req.schedule);
        self.with_optional_prod(body, tail, req.parent_offering, false)
    }

    fn it(&self, t: &ParentTemplate, req: &NameRequest<'_>) -> String {
        let mut prefix = Parts::default();
        prefix.push(req.kind.as_str());
        prefix.push(self.resolved_division(t, req).unwrap_or(Division::Hs).as_str());
        prefix.push(t.country());
        prefix.push("IT");

        let topic = t
            .topic_phrase()
            .or_else(|| t.first_significant_word().map(String::from));

        let mut body = Parts::default();
        body.push(prefix.bracketed());
        match topic {
            Some(topic) => body.push(join_topic(&topic, &t.catalog)),
            None => body.push(t.catalog_lower()),
        }
        body.extend(req.app);
        body.extend(Self::solving(req));

        let mut tail = Parts::default();
        tail.push(req.schedule);
        self.with_optional_prod(body, tail, req.parent_offering, false)
    }

    /// Shared prefix of the HR / Medical / DAK departments, which omit an
    /// undetermined division
    fn department_prefix(&self, t: &ParentTemplate, req: &NameRequest<'_>) -> Parts {
        let mut prefix = Parts::default();
        prefix.push(req.kind.as_str());
        if let Some(division) = self.resolved_division(t, req) {
            prefix.push(division.as_str());
        }
        prefix.push(t.country());
        prefix.extend(self.convention.department());
        prefix
    }

    fn hr(&self, t: &ParentTemplate, req: &NameRequest<'_>) -> String {
        let prefix = self.department_prefix(t, req);
        let topic = t.topic_phrase().unwrap_or_else(|| DEFAULT_TOPIC.to_string());

        let mut parts = Parts::default();
        parts.push(prefix.bracketed());
        parts.push(join_topic(&topic, &t.catalog));
        parts.extend(req.app);
        parts.push(req.schedule);
        parts.join()
    }

    fn medical(&self, t: &ParentTemplate, req: &NameRequest<'_>) -> String {
        let prefix = self.department_prefix(t, req);
        let topic = t.topic_phrase().unwrap_or_else(|| DEFAULT_TOPIC.to_string());

        let mut parts = Parts::default();
        parts.push(prefix.bracketed());
        parts.push(join_topic(&topic, &t.catalog));
        parts.push(req.schedule);
        parts.join()
    }

    fn dak(&self, t: &ParentTemplate, req: &NameRequest<'_>) -> String {
        let prefix = self.department_prefix(t, req);

        let mut parts = Parts::default();
        parts.push(prefix.bracketed());
        parts.push(t.catalog.as_str());
        parts.extend(req.app);
        parts.push(req.schedule);
        parts.join()
    }

    fn corp(&self, t: &ParentTemplate, req: &NameRequest<'_>) -> String {
        let mut prefix = Parts::default();
        prefix.push(req.kind.as_str());
        prefix.extend(self.delivering_part(t, req, Some(2)));
        prefix.push("CORP");
        prefix.push(req.receiver);
        if let Some(marker) = t.department.as_deref().or_else(|| t.last_topic()) {
            prefix.push(marker);
        }

        let mut body = Parts::default();
        body.push(prefix.bracketed());
        body.push(t.catalog.as_str());
        body.extend(req.app);
        body.extend(Self::solving(req));

        let mut tail = Parts::default();
        tail.push(req.schedule);
        self.with_optional_prod(body, tail, req.parent_offering, false)
    }

    fn corp_recp(&self, t: &ParentTemplate, req: &NameRequest<'_>) -> String {
        let mut prefix = Parts::default();
        prefix.push(req.kind.as_str());
        prefix.push(self.delivering_division(t, req).as_str());
        prefix.push(t.country());
        prefix.push("CORP");
        prefix.extend(self.delivering_part(t, req, None));
        prefix.push("IT");

        let mut body = Parts::default();
        body.push(prefix.bracketed());
        match t.first_topic() {
            Some(topic) => body.push(join_topic(topic, &t.catalog)),
            None => body.push(t.catalog_lower()),
        }
        body.extend(req.app);
        body.extend(Self::solving(req));

        let mut tail = Parts::default();
        tail.push(req.schedule);
        self.with_optional_prod(body, tail, req.parent_offering, false)
    }

    fn corp_it(&self, t: &ParentTemplate, req: &NameRequest<'_>) -> String {
        let mut prefix = Parts::default();
        prefix.push(req.kind.as_str());
        prefix.extend(self.delivering_part(t, req, None));
        prefix.push("CORP");
        if req.receiver.trim().is_empty() {
            prefix.push(self.delivering_division(t, req).as_str());
            prefix.push(t.country());
        } else {
            prefix.push(req.receiver);
        }
        prefix.push("IT");

        let topic = t.first_topic().unwrap_or(DEFAULT_TOPIC);

        let mut parts = Parts::default();
        parts.push(prefix.bracketed());
        parts.push(join_topic(topic, &t.catalog));
        parts.extend(req.app);
        parts.extend(Self::solving(req));
        parts.push(req.schedule);
        parts.join()
    }

    fn corp_dedicated(&self, t: &ParentTemplate, req: &NameRequest<'_>) -> String {
        let mut prefix = Parts::default();
        prefix.push(req.kind.as_str());
        prefix.extend(self.delivering_part(t, req, None));
        prefix.push("CORP");
        prefix.push(req.receiver);
        prefix.push("Dedicated Services");

        let mut body = Parts::default();
        body.push(prefix.bracketed());
        body.push(t.catalog.as_str());
        body.extend(req.app);
        body.extend(Self::solving(req));

        let mut tail = Parts::default();
        tail.push(req.schedule);
        self.with_optional_prod(body, tail, req.parent_offering, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(convention: Convention, req: NameRequest<'_>) -> String {
        let countries = CountryTable::default();
        NameBuilder::new(convention, &countries).build(&req)
    }

    #[test]
    fn test_standard_sr_example() {
        let req = NameRequest::new("[Parent HS PL IT] Software assistance", ServiceKind::Sr, "Mon-Fri 9-17")
            .with_app(Some("Outlook"));
        assert_eq!(
            build(Convention::Standard, req),
            "[SR HS PL IT] Software assistance Outlook Prod Mon-Fri 9-17"
        );
    }

    #[test]
    fn test_standard_im_incident_example() {
        let req = NameRequest::new("[Parent HS PL IT] Software incident", ServiceKind::Im, "Mon-Fri 9-17")
            .with_app(Some("Outlook"));
        let name = build(Convention::Standard, req);
        assert_eq!(name, "[IM HS PL IT] Software incident solving Outlook Prod Mon-Fri 9-17");
        assert!(name.contains("incident solving Outlook Prod Mon-Fri 9-17"));
    }

    #[test]
    fn test_hr_example() {
        let req = NameRequest::new("[Parent HS PL HR] Software assistance", ServiceKind::Sr, "Mon-Fri 8-17")
            .with_app(Some("Outlook"));
        assert_eq!(
            build(Convention::Hr, req),
            "[SR HS PL HR] Software assistance Outlook Mon-Fri 8-17"
        );
    }

    #[test]
    fn test_hr_from_it_parent() {
        let req = NameRequest::new("[Parent HS PL IT] Software assistance", ServiceKind::Sr, "Mon-Fri 8-17")
            .with_app(Some("Outlook"));
        assert_eq!(
            build(Convention::Hr, req),
            "[SR HS PL HR] Software assistance Outlook Mon-Fri 8-17"
        );
    }

    #[test]
    fn test_topic_kept_when_only_a_word_prefix() {
        let req = NameRequest::new("[Parent HS PL App] Application access", ServiceKind::Sr, "Mon-Fri 9-17");
        assert_eq!(
            build(Convention::It, req),
            "[SR HS PL IT] App application access Prod Mon-Fri 9-17"
        );

        let req = NameRequest::new("[Parent HS PL Lab] Laboratory results", ServiceKind::Sr, "Mon-Fri 9-17");
        assert_eq!(
            build(Convention::Hr, req),
            "[SR HS PL HR] Lab laboratory results Mon-Fri 9-17"
        );
    }

    #[test]
    fn test_hr_topic_prefixes_lowercase_catalog() {
        let req = NameRequest::new("[Parent HS PL Payroll] Salary questions", ServiceKind::Sr, "Mon-Fri 8-17");
        assert_eq!(
            build(Convention::Hr, req),
            "[SR HS PL HR] Payroll salary questions Mon-Fri 8-17"
        );
    }

    #[test]
    fn test_ds_override_countries() {
        for cc in ["UA", "MD", "RO", "TR"] {
            let parent = format!("[Parent HS {} IT] Software assistance", cc);
            let req = NameRequest::new(&parent, ServiceKind::Sr, "Mon-Fri 8-16");
            let name = build(Convention::Standard, req);
            assert!(name.starts_with(&format!("[SR DS {} IT]", cc)), "{}", name);
        }
    }

    #[test]
    fn test_no_prod_keywords() {
        let req = NameRequest::new("[Parent HS PL IT] Hardware configuration", ServiceKind::Sr, "Mon-Fri 9-17")
            .with_app(Some("Laptop"));
        let name = build(Convention::Standard, req);
        assert_eq!(name, "[SR HS PL IT] Hardware configuration Laptop Mon-Fri 9-17");

        let req = NameRequest::new("[Parent HS PL IT] Software assistance", ServiceKind::Sr, "24/7")
            .with_app(Some("Mobile Banking"));
        assert!(!build(Convention::Standard, req).contains("Prod"));
    }

    #[test]
    fn test_prod_disabled() {
        let countries = CountryTable::default();
        let builder = NameBuilder::new(Convention::Standard, &countries).with_prod(false);
        let req = NameRequest::new("[Parent HS PL IT] Software assistance", ServiceKind::Sr, "Mon-Fri 9-17");
        assert_eq!(builder.build(&req), "[SR HS PL IT] Software assistance Mon-Fri 9-17");
    }

    #[test]
    fn test_standard_recp_adds_it() {
        let req = NameRequest::new("[Parent DS PL RecP] Access request", ServiceKind::Sr, "Mon-Fri 9-17");
        assert_eq!(
            build(Convention::Standard, req),
            "[SR DS PL RecP IT] Access request Prod Mon-Fri 9-17"
        );
    }

    #[test]
    fn test_germany_uses_receiver_division() {
        let req = NameRequest::new("[Parent HS DE IT] Software assistance", ServiceKind::Sr, "Mon-Fri 7-16")
            .with_receiver("DS DE");
        assert_eq!(
            build(Convention::Standard, req),
            "[SR DS DE IT] Software assistance Prod Mon-Fri 7-16"
        );
    }

    #[test]
    fn test_it_topic_from_catalog() {
        let req = NameRequest::new("[Parent DS MD] Configuration of laptop", ServiceKind::Sr, "Mon-Fri 8-16");
        assert_eq!(
            build(Convention::It, req),
            "[SR DS MD IT] Configuration of laptop Prod Mon-Fri 8-16"
        );
    }

    #[test]
    fn test_it_topic_phrase() {
        let req = NameRequest::new("[Parent DS MD Security & Privacy] Access request", ServiceKind::Sr, "Mon-Fri 8-16");
        assert_eq!(
            build(Convention::It, req),
            "[SR DS MD IT] Security & Privacy access request Mon-Fri 8-16"
        );
    }

    #[test]
    fn test_medical_has_no_app() {
        let req = NameRequest::new("[Parent HS PL Lab] Results", ServiceKind::Sr, "24/7")
            .with_app(Some("LIS"));
        assert_eq!(build(Convention::Medical, req), "[SR HS PL Medical] Lab results 24/7");
    }

    #[test]
    fn test_dak_business_services() {
        let req = NameRequest::new("[Parent HS PL] Invoices", ServiceKind::Sr, "Mon-Fri 8-16")
            .with_app(Some("SAP"));
        assert_eq!(
            build(Convention::Dak, req),
            "[SR HS PL Business Services] Invoices SAP Mon-Fri 8-16"
        );
    }

    #[test]
    fn test_corp() {
        let req = NameRequest::new("[Parent HS PL Finance] Reporting", ServiceKind::Im, "Mon-Fri 8-16")
            .with_app(Some("SAP"))
            .with_receiver("HS DE")
            .with_delivering("HS PL Extra");
        assert_eq!(
            build(Convention::Corp, req),
            "[IM HS PL CORP HS DE Finance] Reporting SAP solving Prod Mon-Fri 8-16"
        );
    }

    #[test]
    fn test_corp_recp() {
        let req = NameRequest::new("[Parent DS PL RecP Software] Installation", ServiceKind::Sr, "Mon-Fri 8-16")
            .with_app(Some("Teams"))
            .with_delivering("HS PL");
        assert_eq!(
            build(Convention::CorpRecp, req),
            "[SR DS PL CORP HS PL IT] Software installation Teams Prod Mon-Fri 8-16"
        );
    }

    #[test]
    fn test_corp_it_has_no_prod() {
        let req = NameRequest::new("[Parent HS PL] Installation", ServiceKind::Sr, "Mon-Fri 8-16")
            .with_receiver("DS DE")
            .with_delivering("HS PL");
        assert_eq!(
            build(Convention::CorpIt, req),
            "[SR HS PL CORP DS DE IT] Software installation Mon-Fri 8-16"
        );
    }

    #[test]
    fn test_corp_dedicated_ds_only_country() {
        let req = NameRequest::new("[Parent HS UA] Hosting", ServiceKind::Sr, "24/7")
            .with_receiver("DS UA")
            .with_delivering("HS PL");
        assert_eq!(
            build(Convention::CorpDedicated, req),
            "[SR DS UA CORP DS UA Dedicated Services] Hosting Prod 24/7"
        );
    }

    #[test]
    fn test_lvl2() {
        let countries = CountryTable::default();
        let builder = NameBuilder::new(Convention::Standard, &countries);

        let req = NameRequest::new("[Parent HS PL IT] Software incident", ServiceKind::Im, "Mon-Fri 9-17")
            .with_app(Some("SAP"));
        assert_eq!(
            builder.build_lvl2(&req, "Application issue"),
            "[IM HS PL IT] Software incident solving SAP Prod Application issue Mon-Fri 9-17"
        );

        let req = NameRequest::new("[Parent SR DS PL] Microsoft licences", ServiceKind::Im, "24/7");
        assert_eq!(builder.build_lvl2(&req, ""), "[SR DS PL] Microsoft licences 24/7");
    }

    #[test]
    fn test_absent_app_and_schedule() {
        let req = NameRequest::new("[Parent HS PL IT] Software assistance", ServiceKind::Sr, "")
            .with_app(Some("  "));
        assert_eq!(build(Convention::Standard, req), "[SR HS PL IT] Software assistance Prod");
    }

    #[test]
    fn test_join_topic() {
        assert_eq!(join_topic("Software", "Software assistance"), "Software assistance");
        assert_eq!(join_topic("Software", "Installation"), "Software installation");
        assert_eq!(join_topic("Software", ""), "Software");
        assert_eq!(join_topic("App", "Application access"), "App application access");
        assert_eq!(join_topic("Security & Privacy", "security & privacy audit"), "security & privacy audit");
        assert_eq!(join_topic("Security & Privacy", "Security"), "Security & Privacy security");
    }
}
