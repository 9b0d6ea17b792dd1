//! Route matching for the one-shot server.
//!
//! The router is an ordered list of rules, checked first to last; the first
//! rule whose method guard and pattern both match wins. Lookup is total:
//! when nothing matches, the fallback handler (404 unless replaced) is
//! returned, so the server always has a behavior to run.

use crate::handler::RouteHandler;
use crate::route::NotFoundHandler;
use http::Method;

/// A target pattern a rule matches against.
#[derive(Debug, Clone)]
pub enum Pattern {
    /// Matches when the target equals the path exactly; the tail is empty.
    Exact(String),
    /// Matches when the target starts with the prefix; the tail is the
    /// remainder, which may be empty.
    Prefix(String),
}

impl Pattern {
    pub fn exact(path: impl Into<String>) -> Self {
        Self::Exact(path.into())
    }

    pub fn prefix(prefix: impl Into<String>) -> Self {
        Self::Prefix(prefix.into())
    }

    fn matches<'req>(&self, target: &'req str) -> Option<&'req str> {
        match self {
            Self::Exact(path) => (path.as_str() == target).then_some(""),
            Self::Prefix(prefix) => target.strip_prefix(prefix.as_str()),
        }
    }
}

/// Main router structure that dispatches a request to a handler
pub struct Router {
    rules: Vec<Rule>,
    fallback: Box<dyn RouteHandler>,
}

/// A single routing rule: an optional method guard, a pattern and the
/// handler to run on a match.
struct Rule {
    method: Option<Method>,
    pattern: Pattern,
    handler: Box<dyn RouteHandler>,
}

/// Result of matching a route: the handler to invoke and the matched tail
pub struct RouteMatch<'router, 'req> {
    handler: &'router dyn RouteHandler,
    tail: &'req str,
}

impl Router {
    /// Creates a new router builder
    pub fn builder() -> RouterBuilder {
        RouterBuilder::new()
    }

    /// Matches a method and target against the router's rules
    ///
    /// Always returns a match; the fallback handler covers everything no
    /// rule claims, including methods without a matching guard.
    pub fn at<'router, 'req>(&'router self, method: &Method, target: &'req str) -> RouteMatch<'router, 'req> {
        for rule in &self.rules {
            if let Some(tail) = rule.matches(method, target) {
                return RouteMatch { handler: rule.handler.as_ref(), tail };
            }
        }
        RouteMatch { handler: self.fallback.as_ref(), tail: "" }
    }
}

impl Rule {
    fn matches<'req>(&self, method: &Method, target: &'req str) -> Option<&'req str> {
        if let Some(required) = &self.method {
            if required != method {
                return None;
            }
        }
        self.pattern.matches(target)
    }
}

impl<'router, 'req> RouteMatch<'router, 'req> {
    /// Gets the matched request handler
    pub fn handler(&self) -> &'router dyn RouteHandler {
        self.handler
    }

    /// Gets the tail the pattern left over; empty for exact matches
    pub fn tail(&self) -> &'req str {
        self.tail
    }
}

pub struct RouterBuilder {
    rules: Vec<Rule>,
    fallback: Option<Box<dyn RouteHandler>>,
}

impl RouterBuilder {
    fn new() -> Self {
        Self { rules: Vec::new(), fallback: None }
    }

    /// Appends a rule; rules are checked in registration order.
    pub fn route(mut self, pattern: Pattern, rule: RuleBuilder) -> Self {
        self.rules.push(Rule { method: rule.method, pattern, handler: rule.handler });
        self
    }

    /// Replaces the fallback handler used when no rule matches.
    pub fn fallback(mut self, handler: impl RouteHandler + 'static) -> Self {
        self.fallback = Some(Box::new(handler));
        self
    }

    /// Builds the router from the accumulated rules
    pub fn build(self) -> Router {
        Router { rules: self.rules, fallback: self.fallback.unwrap_or_else(|| Box::new(NotFoundHandler)) }
    }
}

macro_rules! method_rule {
    ($fn_name:ident, $method:expr) => {
        pub fn $fn_name<H: RouteHandler + 'static>(handler: H) -> RuleBuilder {
            RuleBuilder { method: Some($method), handler: Box::new(handler) }
        }
    };
}

method_rule!(get, Method::GET);
method_rule!(post, Method::POST);

/// A rule that matches regardless of the request method.
pub fn any<H: RouteHandler + 'static>(handler: H) -> RuleBuilder {
    RuleBuilder { method: None, handler: Box::new(handler) }
}

pub struct RuleBuilder {
    method: Option<Method>,
    handler: Box<dyn RouteHandler>,
}
