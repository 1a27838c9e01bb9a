//! Declarative route table
//!
//! The application's routes are described once as a [`RouteDescriptor`]
//! tree. [`RouteTable`] flattens it into full path templates, the sets of
//! protected and auth-flow templates, and breadcrumb chains.

use crate::error::{CoreError, CoreResult};
use once_cell::sync::Lazy;
use std::collections::{BTreeMap, HashSet};

/// Well-known paths
pub mod paths {
    pub const LANDING: &str = "/";
    pub const LOGIN: &str = "/login";
    pub const REGISTER: &str = "/register";
    pub const REGISTER_SUCCESS: &str = "/register/success";
    pub const PAGE_NOT_FOUND: &str = "/page-not-found";
    pub const WAITING: &str = "/waiting";
    /// Where authenticated users land
    pub const DASHBOARD: &str = "/app/dashboard";
    pub const PROJECTS: &str = "/app/projects";
    pub const PROJECT: &str = "/app/projects/:projectId";
    pub const PROJECT_ACCESS_TOKENS: &str = "/app/projects/:projectId/api-tokens";
    pub const PROJECT_TEMPLATES: &str = "/app/projects/:projectId/templates";
    pub const TEMPLATE: &str = "/app/projects/:projectId/templates/:templateId";
}

/// Pages the router can render
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Page {
    Landing,
    About,
    Docs,
    Support,
    Login,
    Register,
    RegisterSuccess,
    PageNotFound,
    Waiting,
    Profile,
    Dashboard,
    Projects,
    ProjectCreate,
    ProjectView,
    ProjectEdit,
    ProjectAccessTokens,
    Templates,
    TemplateCreate,
    TemplateView,
    TemplateEdit,
}

/// What a matched route resolves to
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RouteTarget {
    Page(Page),
    /// Index route that forwards to another path
    Redirect(&'static str),
    /// Grouping node; only its children are routable
    Layout,
}

/// Source of a breadcrumb label
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CrumbSource {
    Static(&'static str),
    /// Title of the project named by `:projectId`
    Project,
    /// Name of the template named by `:templateId`
    Template,
}

/// Static route tree node
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RouteDescriptor {
    pub segment: &'static str,
    pub target: RouteTarget,
    pub is_protected: bool,
    pub is_on_auth_flow: bool,
    /// Informational page still shown to authenticated users on the auth flow
    pub is_post_auth_info: bool,
    pub crumb: Option<CrumbSource>,
    pub title: Option<&'static str>,
    pub children: Vec<RouteDescriptor>,
}

impl RouteDescriptor {
    fn new(segment: &'static str, target: RouteTarget) -> Self {
        Self {
            segment,
            target,
            is_protected: false,
            is_on_auth_flow: false,
            is_post_auth_info: false,
            crumb: None,
            title: None,
            children: Vec::new(),
        }
    }

    pub fn page(segment: &'static str, page: Page) -> Self {
        Self::new(segment, RouteTarget::Page(page))
    }

    pub fn layout(segment: &'static str) -> Self {
        Self::new(segment, RouteTarget::Layout)
    }

    pub fn redirect(segment: &'static str, to: &'static str) -> Self {
        Self::new(segment, RouteTarget::Redirect(to))
    }

    #[must_use]
    pub const fn protected(mut self) -> Self {
        self.is_protected = true;
        self
    }

    #[must_use]
    pub const fn auth_flow(mut self) -> Self {
        self.is_on_auth_flow = true;
        self
    }

    #[must_use]
    pub const fn post_auth_info(mut self) -> Self {
        self.is_post_auth_info = true;
        self
    }

    #[must_use]
    pub const fn crumb(mut self, crumb: CrumbSource) -> Self {
        self.crumb = Some(crumb);
        self
    }

    #[must_use]
    pub const fn title(mut self, title: &'static str) -> Self {
        self.title = Some(title);
        self
    }

    #[must_use]
    pub fn children(mut self, children: Vec<Self>) -> Self {
        self.children = children;
        self
    }
}

/// The application's route tree
pub fn standard_routes() -> RouteDescriptor {
    use CrumbSource::{Project, Static, Template};
    use RouteDescriptor as R;

    R::layout("/").children(vec![
        R::page(paths::REGISTER, Page::Register)
            .auth_flow()
            .title("Register"),
        R::page(paths::REGISTER_SUCCESS, Page::RegisterSuccess)
            .auth_flow()
            .post_auth_info()
            .title("Register Success"),
        R::page(paths::LOGIN, Page::Login).auth_flow().title("Login"),
        R::page(paths::PAGE_NOT_FOUND, Page::PageNotFound)
            .auth_flow()
            .title("Page not found"),
        R::page(paths::WAITING, Page::Waiting)
            .auth_flow()
            .title("Waiting..."),
        R::page("", Page::Landing),
        R::page("/about", Page::About),
        R::page("/docs", Page::Docs),
        R::page("/profile", Page::Profile).protected(),
        R::page("/support", Page::Support),
        R::layout("app").protected().children(vec![
            R::redirect("", paths::DASHBOARD).protected(),
            R::page("dashboard", Page::Dashboard)
                .protected()
                .title("Dashboard"),
            R::layout("projects")
                .protected()
                .crumb(Static("Projects"))
                .title("Projects")
                .children(vec![
                    R::page("", Page::Projects).protected(),
                    R::page("create", Page::ProjectCreate)
                        .protected()
                        .crumb(Static("Create new project"))
                        .title("Create new project"),
                    R::layout(":projectId")
                        .protected()
                        .crumb(Project)
                        .title("Project")
                        .children(vec![
                            R::page("", Page::ProjectView).protected(),
                            R::page("edit", Page::ProjectEdit)
                                .protected()
                                .crumb(Static("Edit"))
                                .title("Edit project"),
                            R::page("api-tokens", Page::ProjectAccessTokens)
                                .protected()
                                .crumb(Static("API tokens"))
                                .title("Project API tokens"),
                            R::layout("templates")
                                .protected()
                                .crumb(Static("Templates"))
                                .title("Project templates")
                                .children(vec![
                                    R::page("", Page::Templates).protected(),
                                    R::page("create", Page::TemplateCreate)
                                        .protected()
                                        .crumb(Static("Create new template"))
                                        .title("Create new template"),
                                    R::layout(":templateId")
                                        .protected()
                                        .crumb(Template)
                                        .title("Template details")
                                        .children(vec![
                                            R::page("", Page::TemplateView).protected(),
                                            R::page("edit", Page::TemplateEdit)
                                                .protected()
                                                .crumb(Static("Edit"))
                                                .title("Edit template"),
                                        ]),
                                ]),
                        ]),
                ]),
        ]),
    ])
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum Segment {
    Static(String),
    Param(String),
}

/// A routable entry with its full template
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FlatRoute {
    pub template: String,
    pub target: RouteTarget,
    pub is_protected: bool,
    pub is_on_auth_flow: bool,
    pub is_post_auth_info: bool,
    /// Nearest title on the path from the root
    pub title: Option<&'static str>,
    crumbs: Vec<(String, CrumbSource)>,
    segments: Vec<Segment>,
}

impl FlatRoute {
    pub fn page(&self) -> Option<Page> {
        match self.target {
            RouteTarget::Page(page) => Some(page),
            _ => None,
        }
    }
}

/// Flattened, immutable route table
#[derive(Debug)]
pub struct RouteTable {
    routes: Vec<FlatRoute>,
    protected: HashSet<String>,
    auth_flow: HashSet<String>,
}

static STANDARD: Lazy<RouteTable> = Lazy::new(|| RouteTable::new(&standard_routes()));

impl RouteTable {
    /// Flatten a route tree
    pub fn new(root: &RouteDescriptor) -> Self {
        let mut routes = Vec::new();
        flatten(root, "", None, &[], &mut routes);

        let protected = routes
            .iter()
            .filter(|route| route.is_protected)
            .map(|route| route.template.clone())
            .collect();
        let auth_flow = routes
            .iter()
            .filter(|route| route.is_on_auth_flow)
            .map(|route| route.template.clone())
            .collect();

        Self {
            routes,
            protected,
            auth_flow,
        }
    }

    /// The application's table, built on first use
    pub fn standard() -> &'static Self {
        &STANDARD
    }

    pub fn routes(&self) -> &[FlatRoute] {
        &self.routes
    }

    /// Templates that require an authenticated session
    pub fn protected_templates(&self) -> &HashSet<String> {
        &self.protected
    }

    /// Templates that belong to the login/registration sequence
    pub fn auth_flow_templates(&self) -> &HashSet<String> {
        &self.auth_flow
    }

    /// Find the route for a concrete path
    ///
    /// Static segments win over parameters, so `/app/projects/create` is the
    /// creation page rather than a project called "create".
    pub fn resolve(&self, path: &str) -> Option<RouteMatch<'_>> {
        let parts = split_path(path);

        self.routes
            .iter()
            .filter_map(|route| {
                let params = match_segments(&route.segments, &parts)?;
                let score = route
                    .segments
                    .iter()
                    .filter(|segment| matches!(segment, Segment::Static(_)))
                    .count();
                Some((score, RouteMatch { route, params }))
            })
            .fold(None, |best: Option<(usize, RouteMatch<'_>)>, candidate| match best {
                Some(best) if best.0 >= candidate.0 => Some(best),
                _ => Some(candidate),
            })
            .map(|(_, matched)| matched)
    }

    /// Whether a concrete path needs an authenticated session
    pub fn is_protected_path(&self, path: &str) -> bool {
        self.resolve(path)
            .is_some_and(|matched| self.protected.contains(&matched.route.template))
    }

    /// Whether a concrete path is part of the login/registration sequence
    pub fn is_auth_flow_path(&self, path: &str) -> bool {
        self.resolve(path)
            .is_some_and(|matched| self.auth_flow.contains(&matched.route.template))
    }
}

fn join(parent: &str, segment: &str) -> String {
    if segment.starts_with('/') {
        return segment.to_string();
    }
    if segment.is_empty() {
        return if parent.is_empty() { "/".to_string() } else { parent.to_string() };
    }
    if parent.is_empty() || parent == "/" {
        format!("/{segment}")
    } else {
        format!("{parent}/{segment}")
    }
}

fn flatten(
    node: &RouteDescriptor,
    parent: &str,
    inherited_title: Option<&'static str>,
    crumbs: &[(String, CrumbSource)],
    out: &mut Vec<FlatRoute>,
) {
    let template = join(parent, node.segment);
    let title = node.title.or(inherited_title);

    let mut chain = crumbs.to_vec();
    if let Some(crumb) = node.crumb {
        chain.push((template.clone(), crumb));
    }

    if !matches!(node.target, RouteTarget::Layout) {
        out.push(FlatRoute {
            segments: parse_template(&template),
            template: template.clone(),
            target: node.target,
            is_protected: node.is_protected,
            is_on_auth_flow: node.is_on_auth_flow,
            is_post_auth_info: node.is_post_auth_info,
            title,
            crumbs: chain.clone(),
        });
    }

    for child in &node.children {
        flatten(child, &template, title, &chain, out);
    }
}

fn split_path(path: &str) -> Vec<&str> {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    path.split('/').filter(|part| !part.is_empty()).collect()
}

fn parse_template(template: &str) -> Vec<Segment> {
    split_path(template)
        .into_iter()
        .map(|part| match part.strip_prefix(':') {
            Some(name) => Segment::Param(name.to_string()),
            None => Segment::Static(part.to_string()),
        })
        .collect()
}

fn match_segments(segments: &[Segment], parts: &[&str]) -> Option<BTreeMap<String, String>> {
    if segments.len() != parts.len() {
        return None;
    }
    let mut params = BTreeMap::new();
    for (segment, part) in segments.iter().zip(parts) {
        match segment {
            Segment::Static(expected) if expected == part => {}
            Segment::Static(_) => return None,
            Segment::Param(name) => {
                params.insert(name.clone(), (*part).to_string());
            }
        }
    }
    Some(params)
}

/// A concrete path resolved against the table
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RouteMatch<'a> {
    pub route: &'a FlatRoute,
    pub params: BTreeMap<String, String>,
}

impl RouteMatch<'_> {
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    /// Breadcrumb trail from the outermost crumb to this route
    pub fn breadcrumbs(&self) -> Vec<Breadcrumb> {
        self.route
            .crumbs
            .iter()
            .filter_map(|(template, source)| {
                let href = interpolate_path(
                    template,
                    self.params.iter().map(|(k, v)| (k.as_str(), v.as_str())),
                )
                .ok()?;
                let label = match source {
                    CrumbSource::Static(text) => CrumbLabel::Static(*text),
                    CrumbSource::Project => CrumbLabel::Project(self.param("projectId")?.to_string()),
                    CrumbSource::Template => {
                        CrumbLabel::Template(self.param("templateId")?.to_string())
                    }
                };
                Some(Breadcrumb { label, href })
            })
            .collect()
    }
}

/// Label of a breadcrumb; dynamic labels are looked up by id on demand
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CrumbLabel {
    Static(&'static str),
    Project(String),
    Template(String),
}

impl CrumbLabel {
    /// Text shown until (or unless) the entity name is known
    pub fn fallback(&self) -> String {
        match self {
            Self::Static(text) => (*text).to_string(),
            Self::Project(id) => format!("Project {id}"),
            Self::Template(id) => format!("Template {id}"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Breadcrumb {
    pub label: CrumbLabel,
    pub href: String,
}

/// Replace `:name` segments of a template with parameter values
pub fn interpolate_path<'a>(
    template: &str,
    params: impl IntoIterator<Item = (&'a str, &'a str)>,
) -> CoreResult<String> {
    let params: BTreeMap<&str, &str> = params.into_iter().collect();

    let parts = template
        .split('/')
        .map(|part| match part.strip_prefix(':') {
            Some(name) => params
                .get(name)
                .map(|value| (*value).to_string())
                .ok_or_else(|| CoreError::MissingPathParam {
                    template: template.to_string(),
                    name: name.to_string(),
                }),
            None => Ok(part.to_string()),
        })
        .collect::<CoreResult<Vec<_>>>()?;

    Ok(parts.join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_children_concatenate_ancestor_segments() {
        let table = RouteTable::standard();
        let templates: Vec<&str> = table.routes().iter().map(|r| r.template.as_str()).collect();

        for expected in [
            "/",
            "/login",
            "/register/success",
            "/app",
            "/app/dashboard",
            "/app/projects",
            "/app/projects/create",
            "/app/projects/:projectId",
            "/app/projects/:projectId/api-tokens",
            "/app/projects/:projectId/templates/:templateId/edit",
        ] {
            assert!(templates.contains(&expected), "missing {expected}");
        }
    }

    #[test]
    fn test_protected_and_auth_flow_sets() {
        let table = RouteTable::standard();

        assert!(table.protected_templates().contains("/app/dashboard"));
        assert!(table.protected_templates().contains("/profile"));
        assert!(!table.protected_templates().contains("/login"));

        let auth_flow = table.auth_flow_templates();
        assert_eq!(auth_flow.len(), 5);
        assert!(auth_flow.contains("/register/success"));
        assert!(auth_flow.is_disjoint(table.protected_templates()));
    }

    #[test]
    fn test_resolve_prefers_static_segments() {
        let table = RouteTable::standard();

        let create = table.resolve("/app/projects/create").unwrap();
        assert_eq!(create.route.page(), Some(Page::ProjectCreate));

        let view = table.resolve("/app/projects/p-42").unwrap();
        assert_eq!(view.route.page(), Some(Page::ProjectView));
        assert_eq!(view.param("projectId"), Some("p-42"));
    }

    #[test]
    fn test_resolve_ignores_trailing_slash_and_query() {
        let table = RouteTable::standard();
        let matched = table.resolve("/app/projects/p-1/templates/t-2/?tab=schema").unwrap();

        assert_eq!(matched.route.page(), Some(Page::TemplateView));
        assert_eq!(matched.param("templateId"), Some("t-2"));
        assert_eq!(matched.route.title, Some("Template details"));
    }

    #[test]
    fn test_unknown_path_does_not_resolve() {
        let table = RouteTable::standard();
        assert!(table.resolve("/nowhere").is_none());
        assert!(table.resolve("/app/projects/p-1/unknown").is_none());
        assert!(!table.is_protected_path("/nowhere"));
    }

    #[test]
    fn test_app_index_is_redirect() {
        let table = RouteTable::standard();
        let matched = table.resolve("/app").unwrap();
        assert_eq!(matched.route.target, RouteTarget::Redirect(paths::DASHBOARD));
        assert!(matched.route.is_protected);
    }

    #[test]
    fn test_breadcrumbs_resolve_dynamic_labels() {
        let table = RouteTable::standard();
        let matched = table.resolve("/app/projects/p-1/templates/t-2/edit").unwrap();

        let crumbs = matched.breadcrumbs();
        let labels: Vec<String> = crumbs.iter().map(|c| c.label.fallback()).collect();
        assert_eq!(
            labels,
            vec!["Projects", "Project p-1", "Templates", "Template t-2", "Edit"]
        );
        assert_eq!(crumbs[1].label, CrumbLabel::Project("p-1".to_string()));
        assert_eq!(crumbs[1].href, "/app/projects/p-1");
        assert_eq!(crumbs[3].href, "/app/projects/p-1/templates/t-2");
    }

    #[test]
    fn test_interpolate_path() {
        assert_eq!(
            interpolate_path("backend/projects/:id", [("id", "42")]).unwrap(),
            "backend/projects/42"
        );
        assert_eq!(
            interpolate_path(paths::TEMPLATE, [("projectId", "p"), ("templateId", "t")]).unwrap(),
            "/app/projects/p/templates/t"
        );

        let err = interpolate_path("/users/:id", [("userId", "1")]).unwrap_err();
        assert!(matches!(err, CoreError::MissingPathParam { name, .. } if name == "id"));
    }

    #[test]
    fn test_custom_tree() {
        let tree = RouteDescriptor::layout("/").children(vec![
            RouteDescriptor::page("/login", Page::Login).auth_flow(),
            RouteDescriptor::layout("admin")
                .protected()
                .children(vec![RouteDescriptor::page("", Page::Dashboard).protected()]),
        ]);
        let table = RouteTable::new(&tree);

        assert_eq!(table.routes().len(), 2);
        assert!(table.is_protected_path("/admin"));
        assert!(table.is_auth_flow_path("/login"));
    }
}
