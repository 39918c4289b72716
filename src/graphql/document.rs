//! Query and fragment documents.
//!
//! Cards declare the fields they read as a [`Fragment`]; list views declare a
//! root [`Operation`] that spreads those fragments. The operation text sent over
//! the wire is the query followed by every fragment it depends on, so a single
//! request carries the union of all declared field requirements.

use graphql_parser::query::{
    parse_query, Definition, Document, FragmentDefinition, OperationDefinition, Selection,
    SelectionSet, VariableDefinition,
};
use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;

use super::FetchError;

/// Parsed fragment / operation ASTs. `String` text keeps them `'static`.
pub type FragmentAst = FragmentDefinition<'static, String>;
pub type SelectionAst = SelectionSet<'static, String>;
pub type VariableAst = VariableDefinition<'static, String>;

/// A named, reusable declaration of the fields one view reads from an entity.
pub struct Fragment {
    name: &'static str,
    text: &'static str,
    parsed: OnceLock<Result<FragmentAst, String>>,
}

impl Fragment {
    pub const fn new(name: &'static str, text: &'static str) -> Self {
        Self {
            name,
            text,
            parsed: OnceLock::new(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn text(&self) -> &'static str {
        self.text
    }

    /// Parsed definition (parsed once, cached for the process lifetime).
    pub fn definition(&self) -> Result<&FragmentAst, FetchError> {
        self.parsed
            .get_or_init(|| parse_fragment(self.name, self.text))
            .as_ref()
            .map_err(|e| FetchError::Document(e.clone()))
    }
}

impl std::fmt::Debug for Fragment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Fragment").field("name", &self.name).finish()
    }
}

fn parse_fragment(name: &str, text: &str) -> Result<FragmentAst, String> {
    let doc = parse_query::<String>(text)
        .map_err(|e| format!("fragment {name}: {e}"))?
        .into_static();
    doc.definitions
        .into_iter()
        .find_map(|d| match d {
            Definition::Fragment(frag) if frag.name == name => Some(frag),
            _ => None,
        })
        .ok_or_else(|| format!("fragment {name}: definition not found in its own text"))
}

/// A root query plus the fragments its selection spreads.
pub struct Operation {
    name: &'static str,
    text: &'static str,
    fragments: &'static [&'static Fragment],
    parsed: OnceLock<Result<ParsedOperation, String>>,
}

/// Everything the store needs to normalize a response and read it back.
#[derive(Debug)]
pub struct ParsedOperation {
    pub text: String,
    pub selection_set: SelectionAst,
    pub variables: Vec<VariableAst>,
    pub fragments: HashMap<String, FragmentAst>,
}

impl Operation {
    pub const fn new(
        name: &'static str,
        text: &'static str,
        fragments: &'static [&'static Fragment],
    ) -> Self {
        Self {
            name,
            text,
            fragments,
            parsed: OnceLock::new(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn fragments(&self) -> &'static [&'static Fragment] {
        self.fragments
    }

    /// Full request text: the query, then each fragment definition once.
    pub fn text(&self) -> Result<&str, FetchError> {
        self.parsed().map(|p| p.text.as_str())
    }

    pub fn parsed(&self) -> Result<&ParsedOperation, FetchError> {
        self.parsed
            .get_or_init(|| self.parse())
            .as_ref()
            .map_err(|e| FetchError::Document(e.clone()))
    }

    fn parse(&self) -> Result<ParsedOperation, String> {
        let text = compose(self.text, self.fragments);
        let doc: Document<'static, String> = parse_query::<String>(&text)
            .map_err(|e| format!("operation {}: {e}", self.name))?
            .into_static();

        let mut query = None;
        let mut fragments = HashMap::new();
        for def in doc.definitions {
            match def {
                Definition::Operation(OperationDefinition::Query(q)) => {
                    query = Some((q.selection_set, q.variable_definitions));
                }
                Definition::Operation(OperationDefinition::SelectionSet(set)) => {
                    query = Some((set, Vec::new()));
                }
                Definition::Operation(_) => {
                    return Err(format!("operation {}: only queries are supported", self.name));
                }
                Definition::Fragment(frag) => {
                    fragments.insert(frag.name.clone(), frag);
                }
            }
        }
        let (selection_set, variables) =
            query.ok_or_else(|| format!("operation {}: no query definition", self.name))?;

        let parsed = ParsedOperation {
            text,
            selection_set,
            variables,
            fragments,
        };
        parsed.check_spreads().map_err(|missing| {
            format!("operation {}: unknown fragment ...{missing}", self.name)
        })?;
        Ok(parsed)
    }
}

impl std::fmt::Debug for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Operation").field("name", &self.name).finish()
    }
}

/// Append fragment definitions to a query text, skipping duplicates by name.
pub fn compose(query: &str, fragments: &[&Fragment]) -> String {
    let mut seen = HashSet::new();
    let mut out = String::from(query.trim());
    for frag in fragments {
        if seen.insert(frag.name()) {
            out.push_str("\n\n");
            out.push_str(frag.text().trim());
        }
    }
    out
}

impl ParsedOperation {
    /// Every fragment spread must resolve to a definition in this document.
    fn check_spreads(&self) -> Result<(), String> {
        let mut stack: Vec<&SelectionAst> = vec![&self.selection_set];
        stack.extend(self.fragments.values().map(|f| &f.selection_set));
        while let Some(set) = stack.pop() {
            for item in &set.items {
                match item {
                    Selection::Field(field) => stack.push(&field.selection_set),
                    Selection::InlineFragment(inline) => stack.push(&inline.selection_set),
                    Selection::FragmentSpread(spread) => {
                        if !self.fragments.contains_key(&spread.fragment_name) {
                            return Err(spread.fragment_name.clone());
                        }
                    }
                }
            }
        }
        Ok(())
    }
}
