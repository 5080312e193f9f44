//! Canonical [OWL 2 functional-style syntax](https://www.w3.org/TR/owl2-syntax/) serializer.

use crate::annotation::{Annotation, AnnotationSubject, AnnotationValue};
use crate::axiom::{Axiom, AxiomKind};
use crate::entity::{
    AnnotationProperty, AnonymousIndividual, DataProperty, Datatype, Entity, EntityType,
    Individual, NamedIndividual, ObjectProperty, OwlClass,
};
use crate::error::PrefixError;
use crate::expression::{ClassExpression, DataRange, FacetRestriction, ObjectPropertyExpression};
use crate::literal::OwlLiteral;
use crate::node_id::{is_nc_name, sanitize_to_ncname};
use crate::ontology::Ontology;
use crate::ordering::{
    AnnotationValueShortFormProvider, Orderable, OwlObjectComparator, ShortFormProvider,
    SimpleShortFormProvider,
};
use crate::prefix::PrefixMap;
use crate::rule::{Atom, DArgument, IArgument, Rule, SwrlVariable};
use crate::visit::Visitor;
use oxrdf::NamedNode;
use oxrdf::vocab::xsd;
use rustc_hash::{FxHashMap, FxHashSet};
use std::borrow::Cow;
use std::collections::BTreeSet;
use std::io::{self, Write};
use std::sync::Arc;

const BANNER: &str = "############################";

/// Options of the [`FunctionalSyntaxSerializer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SerializerConfig {
    /// Writes `^^xsd:string` on plain string literals.
    pub explicit_string_typing: bool,
    /// Writes a declaration for each entity of the signature that has none.
    ///
    /// Built-in entities and illegally punned IRIs never get one.
    pub add_missing_declarations: bool,
    /// Indents the content of `Ontology(...)` with tabs.
    pub indent: bool,
    /// Orders entities by their label instead of their IRI.
    pub sort_by_labels: bool,
}

impl SerializerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn explicit_string_typing(mut self, value: bool) -> Self {
        self.explicit_string_typing = value;
        self
    }

    #[must_use]
    pub fn add_missing_declarations(mut self, value: bool) -> Self {
        self.add_missing_declarations = value;
        self
    }

    #[must_use]
    pub fn indent(mut self, value: bool) -> Self {
        self.indent = value;
        self
    }

    #[must_use]
    pub fn sort_by_labels(mut self, value: bool) -> Self {
        self.sort_by_labels = value;
        self
    }
}

impl Default for SerializerConfig {
    fn default() -> Self {
        Self {
            explicit_string_typing: false,
            add_missing_declarations: true,
            indent: false,
            sort_by_labels: false,
        }
    }
}

/// A functional-style syntax serializer.
///
/// The output is deterministic: the same ontology always gives the same text, whatever the order
/// in which its axioms were added.
///
/// ```
/// use oxontology::{Axiom, FunctionalSyntaxSerializer, Ontology, OwlClass};
/// use oxrdf::NamedNode;
///
/// let mut ontology = Ontology::with_iri("http://example.com/o")?;
/// ontology.add_axiom(Axiom::subclass_of(
///     OwlClass::new(NamedNode::new("http://example.com/o#A")?).into(),
///     OwlClass::new(NamedNode::new("http://example.com/o#B")?).into(),
/// ));
/// let mut serializer = FunctionalSyntaxSerializer::new().for_writer(Vec::new());
/// serializer.serialize_ontology(&ontology)?;
/// let text = String::from_utf8(serializer.finish()?)?;
/// assert!(text.contains("Prefix(:=<http://example.com/o#>)"));
/// assert!(text.contains("Declaration(Class(:A))"));
/// assert!(text.contains("SubClassOf(:A :B)"));
/// # Result::<_, Box<dyn std::error::Error>>::Ok(())
/// ```
#[must_use]
#[derive(Clone)]
pub struct FunctionalSyntaxSerializer {
    prefixes: PrefixMap,
    config: SerializerConfig,
    illegal_punnings: Option<BTreeSet<NamedNode>>,
    labels: Option<Arc<dyn ShortFormProvider + Send + Sync>>,
}

impl FunctionalSyntaxSerializer {
    /// A serializer with the `owl`, `rdf`, `rdfs`, `xml` and `xsd` prefixes.
    #[inline]
    pub fn new() -> Self {
        Self {
            prefixes: PrefixMap::with_standard_prefixes(),
            config: SerializerConfig::default(),
            illegal_punnings: None,
            labels: None,
        }
    }

    #[inline]
    pub fn with_prefix(
        mut self,
        prefix_name: impl Into<String>,
        prefix_iri: impl Into<String>,
    ) -> Result<Self, PrefixError> {
        self.prefixes.add_prefix(prefix_name, prefix_iri)?;
        Ok(self)
    }

    /// Replaces the whole prefix table.
    #[inline]
    pub fn with_prefixes(mut self, prefixes: PrefixMap) -> Self {
        self.prefixes = prefixes;
        self
    }

    #[inline]
    pub fn with_config(mut self, config: SerializerConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the IRIs for which no declaration is ever synthesized.
    ///
    /// Defaults to [`Ontology::illegal_punnings`] of the serialized ontology.
    #[inline]
    pub fn with_illegal_punnings(mut self, iris: BTreeSet<NamedNode>) -> Self {
        self.illegal_punnings = Some(iris);
        self
    }

    /// Sets the source of the entity labels written in comments and used by
    /// [`SerializerConfig::sort_by_labels`].
    ///
    /// Defaults to `rdfs:label` values, falling back to the IRI local name.
    #[inline]
    pub fn with_short_form_provider(
        mut self,
        provider: impl ShortFormProvider + Send + Sync + 'static,
    ) -> Self {
        self.labels = Some(Arc::new(provider));
        self
    }

    /// Writes to a [`Write`] implementation.
    pub fn for_writer<W: Write>(self, write: W) -> WriterFunctionalSyntaxSerializer<W> {
        WriterFunctionalSyntaxSerializer {
            out: IndentingWriter {
                write,
                indent: false,
                at_line_start: true,
            },
            anonymous_names: AnonymousNames::default(),
            prefixes: self.prefixes,
            config: self.config,
            illegal_punnings: self.illegal_punnings,
            labels: self.labels,
        }
    }
}

impl Default for FunctionalSyntaxSerializer {
    fn default() -> Self {
        Self::new()
    }
}

/// Writes functional-style syntax to a [`Write`] implementation.
///
/// Can be built using [`FunctionalSyntaxSerializer::for_writer`].
#[must_use]
pub struct WriterFunctionalSyntaxSerializer<W: Write> {
    out: IndentingWriter<W>,
    anonymous_names: AnonymousNames,
    prefixes: PrefixMap,
    config: SerializerConfig,
    illegal_punnings: Option<BTreeSet<NamedNode>>,
    labels: Option<Arc<dyn ShortFormProvider + Send + Sync>>,
}

impl<W: Write> WriterFunctionalSyntaxSerializer<W> {
    /// Writes a complete document: prefixes, then the ontology.
    ///
    /// If no default prefix is set, one is derived from the ontology IRI.
    pub fn serialize_ontology(&mut self, ontology: &Ontology) -> io::Result<()> {
        tracing::debug!(
            ontology = ?ontology.iri().map(NamedNode::as_str),
            axioms = ontology.axiom_count(),
            "serializing ontology"
        );
        let mut prefixes = self.prefixes.clone();
        if prefixes.default_prefix().is_none() {
            if let Some(iri) = ontology.iri() {
                let iri = iri.as_str();
                let namespace = if iri.ends_with(['/', '#']) {
                    iri.to_owned()
                } else {
                    format!("{iri}#")
                };
                if let Err(e) = prefixes.set_default_prefix(namespace) {
                    tracing::debug!("no default prefix derived from the ontology IRI: {e}");
                }
            }
        }
        let computed_punnings;
        let illegal_punnings = match &self.illegal_punnings {
            Some(iris) => iris,
            None => {
                computed_punnings = ontology.illegal_punnings();
                &computed_punnings
            }
        };
        let default_labels;
        let labels: &dyn ShortFormProvider = match &self.labels {
            Some(labels) => labels.as_ref(),
            None => {
                default_labels =
                    AnnotationValueShortFormProvider::new(ontology, SimpleShortFormProvider);
                &default_labels
            }
        };
        self.anonymous_names.reserve(ontology.anonymous_individuals());
        let mut document = DocumentWriter {
            renderer: ObjectRenderer {
                out: &mut self.out,
                anonymous_names: &mut self.anonymous_names,
                prefixes: &prefixes,
                explicit_string_typing: self.config.explicit_string_typing,
                focus: None,
            },
            ontology,
            index: EntityIndex::new(ontology),
            config: self.config,
            illegal_punnings,
            labels,
            written: FxHashSet::default(),
        };
        document.write_document()
    }

    /// Writes a single axiom on its own line.
    ///
    /// Axioms with fewer operands than OWL 2 requires are skipped.
    pub fn serialize_axiom(&mut self, axiom: &Axiom) -> io::Result<()> {
        self.renderer(None).write_axiom_line(axiom)
    }

    /// Writes a single axiom on its own line, as part of the description of `focus`.
    ///
    /// In an axiom with exactly two operands, the operand equal to `focus` is written first.
    pub fn serialize_axiom_about(&mut self, axiom: &Axiom, focus: &Entity) -> io::Result<()> {
        self.renderer(Some(focus.clone())).write_axiom_line(axiom)
    }

    /// Ends the write process and returns the underlying [`Write`].
    pub fn finish(mut self) -> io::Result<W> {
        self.out.write.flush()?;
        Ok(self.out.write)
    }

    fn renderer(&mut self, focus: Option<Entity>) -> ObjectRenderer<'_, W> {
        ObjectRenderer {
            out: &mut self.out,
            anonymous_names: &mut self.anonymous_names,
            prefixes: &self.prefixes,
            explicit_string_typing: self.config.explicit_string_typing,
            focus,
        }
    }
}

/// Inserts a tab at the beginning of each non-empty line while indentation is on.
struct IndentingWriter<W: Write> {
    write: W,
    indent: bool,
    at_line_start: bool,
}

impl<W: Write> IndentingWriter<W> {
    fn write_str(&mut self, s: &str) -> io::Result<()> {
        if !self.indent {
            return self.write_verbatim(s);
        }
        for (i, line) in s.split('\n').enumerate() {
            if i > 0 {
                self.write.write_all(b"\n")?;
                self.at_line_start = true;
            }
            if !line.is_empty() {
                if self.at_line_start {
                    self.write.write_all(b"\t")?;
                }
                self.write.write_all(line.as_bytes())?;
                self.at_line_start = false;
            }
        }
        Ok(())
    }

    /// Writes `s` as is, even if it contains line breaks.
    fn write_verbatim(&mut self, s: &str) -> io::Result<()> {
        if s.is_empty() {
            return Ok(());
        }
        self.write.write_all(s.as_bytes())?;
        self.at_line_start = s.ends_with('\n');
        Ok(())
    }
}

/// Names written for anonymous individuals.
///
/// Ids that are not NCNames are sanitized. Two distinct individuals written by the same writer never
/// share a name.
#[derive(Default)]
struct AnonymousNames {
    assigned: FxHashMap<AnonymousIndividual, String>,
    taken: FxHashSet<String>,
}

impl AnonymousNames {
    /// Assigns names to `individuals`, valid ids first so that they are kept as they are.
    fn reserve(&mut self, individuals: impl IntoIterator<Item = AnonymousIndividual>) {
        let mut to_sanitize = Vec::new();
        for individual in individuals {
            if is_nc_name(individual.id().local_part()) {
                self.name(&individual);
            } else {
                to_sanitize.push(individual);
            }
        }
        for individual in &to_sanitize {
            self.name(individual);
        }
    }

    fn name(&mut self, individual: &AnonymousIndividual) -> &str {
        let taken = &mut self.taken;
        self.assigned.entry(individual.clone()).or_insert_with(|| {
            let local = individual.id().local_part();
            let name = if is_nc_name(local) && !taken.contains(local) {
                local.to_owned()
            } else {
                let base = sanitize_to_ncname(local);
                let mut name = base.clone();
                let mut suffix = 0_u64;
                while taken.contains(&name) {
                    suffix += 1;
                    name = format!("{base}-{suffix}");
                }
                name
            };
            taken.insert(name.clone());
            name
        })
    }
}

/// Per-entity views of the axioms of an ontology, each in canonical order.
///
/// Built in one pass so that the entity blocks do not rescan the whole ontology.
struct EntityIndex<'a> {
    signature: BTreeSet<Entity>,
    sorted_axioms: Vec<&'a Axiom>,
    declarations: FxHashMap<&'a Entity, Vec<&'a Axiom>>,
    annotation_assertions: FxHashMap<&'a NamedNode, Vec<&'a Axiom>>,
    exact_signature: FxHashMap<Entity, Vec<&'a Axiom>>,
}

impl<'a> EntityIndex<'a> {
    fn new(ontology: &'a Ontology) -> Self {
        let mut index = Self {
            signature: ontology.signature(),
            sorted_axioms: ontology.sorted_axioms(),
            declarations: FxHashMap::default(),
            annotation_assertions: FxHashMap::default(),
            exact_signature: FxHashMap::default(),
        };
        for &axiom in &index.sorted_axioms {
            if let Some(entity) = axiom.declared_entity() {
                index.declarations.entry(entity).or_default().push(axiom);
            } else if let Some(iri) = axiom.annotation_subject_iri() {
                index
                    .annotation_assertions
                    .entry(iri)
                    .or_default()
                    .push(axiom);
            } else {
                let mut signature = axiom.content_signature();
                if let (1, Some(entity)) = (signature.len(), signature.pop_first()) {
                    index.exact_signature.entry(entity).or_default().push(axiom);
                }
            }
        }
        index
    }
}

/// The document layout: header, entity blocks and remaining axioms.
struct DocumentWriter<'a, W: Write> {
    renderer: ObjectRenderer<'a, W>,
    ontology: &'a Ontology,
    index: EntityIndex<'a>,
    config: SerializerConfig,
    illegal_punnings: &'a BTreeSet<NamedNode>,
    labels: &'a dyn ShortFormProvider,
    written: FxHashSet<&'a Axiom>,
}

impl<'a, W: Write> DocumentWriter<'a, W> {
    fn write_document(&mut self) -> io::Result<()> {
        for (name, namespace) in self.renderer.prefixes {
            self.write_str(&format!("Prefix({name}:=<{namespace}>)\n"))?;
        }
        self.write_str("\n")?;
        self.write_header()?;
        for entity_type in EntityType::ALL {
            self.write_entity_group(entity_type)?;
        }
        self.renderer.focus = None;
        for axiom in &self.index.sorted_axioms {
            if !self.written.contains(*axiom) {
                self.renderer.write_axiom_line(axiom)?;
            }
        }
        self.renderer.out.indent = false;
        self.write_str(")\n")
    }

    fn write_header(&mut self) -> io::Result<()> {
        self.write_str("Ontology(")?;
        self.renderer.out.indent = self.config.indent;
        if let Some(iri) = self.ontology.iri() {
            self.write_str(&format!("<{}>", iri.as_str()))?;
            if let Some(version_iri) = self.ontology.version_iri() {
                self.write_str(&format!("\n<{}>", version_iri.as_str()))?;
            }
        }
        self.write_str("\n")?;
        let mut imports = self.ontology.imports().collect::<Vec<_>>();
        imports.sort_unstable();
        for import in imports {
            self.write_str(&format!("Import(<{}>)\n", import.as_str()))?;
        }
        for annotation in self.ontology.annotations() {
            self.renderer.visit_annotation(annotation)?;
            self.write_str("\n")?;
        }
        self.write_str("\n")
    }

    fn write_entity_group(&mut self, entity_type: EntityType) -> io::Result<()> {
        let mut entities = self
            .index
            .signature
            .iter()
            .filter(|e| e.entity_type() == entity_type)
            .cloned()
            .collect::<Vec<_>>();
        if self.config.sort_by_labels {
            OwlObjectComparator::new(Some(self.labels)).sort(&mut entities);
        }
        let mut banner_written = false;
        for entity in entities {
            let block = self.entity_block(&entity);
            if block.is_empty() {
                continue;
            }
            if !banner_written {
                self.write_str(&format!(
                    "{BANNER}\n#   {}\n{BANNER}\n\n",
                    entity_type.plural_label()
                ))?;
                banner_written = true;
            }
            tracing::trace!(%entity, axioms = block.len(), "writing entity block");
            self.write_entity_comment(&entity)?;
            self.renderer.focus = Some(entity);
            for axiom in &block {
                self.renderer.write_axiom_line(axiom)?;
            }
            self.write_str("\n")?;
        }
        if banner_written {
            self.write_str("\n")?;
        }
        Ok(())
    }

    /// The axioms describing `entity` that are still to be written, in writing order.
    ///
    /// Marks them as written.
    fn entity_block(&mut self, entity: &Entity) -> Vec<Cow<'a, Axiom>> {
        let index = &self.index;
        let mut block = Vec::new();
        let declarations = index.declarations.get(entity).map_or(&[][..], Vec::as_slice);
        match declarations.first() {
            Some(&first) => {
                if !self.written.contains(first) {
                    block.push(Cow::Borrowed(first));
                }
            }
            None => {
                if self.config.add_missing_declarations
                    && !entity.is_built_in()
                    && !self.illegal_punnings.contains(entity.iri())
                {
                    block.push(Cow::Owned(Axiom::declaration(entity.clone())));
                }
            }
        }
        self.written.extend(declarations.iter().copied());
        let annotation_assertions = index.annotation_assertions.get(entity.iri());
        let exact_signature = index.exact_signature.get(entity);
        for &axiom in annotation_assertions
            .into_iter()
            .chain(exact_signature)
            .flatten()
        {
            if self.written.insert(axiom) {
                block.push(Cow::Borrowed(axiom));
            }
        }
        block
    }

    fn write_entity_comment(&mut self, entity: &Entity) -> io::Result<()> {
        let iri = entity.iri().as_str();
        let name = match self.renderer.prefixes.abbreviate(iri) {
            Some(abbreviated) => abbreviated,
            None => format!("<{iri}>"),
        };
        let label = self.labels.short_form(entity).replace('\n', "\n# ");
        self.write_str(&format!(
            "# {}: {name} ({label})\n\n",
            entity.entity_type().label()
        ))
    }

    fn write_str(&mut self, s: &str) -> io::Result<()> {
        self.renderer.out.write_str(s)
    }
}

/// Writes object model nodes.
struct ObjectRenderer<'a, W: Write> {
    out: &'a mut IndentingWriter<W>,
    anonymous_names: &'a mut AnonymousNames,
    prefixes: &'a PrefixMap,
    explicit_string_typing: bool,
    focus: Option<Entity>,
}

impl<W: Write> ObjectRenderer<'_, W> {
    fn write_axiom_line(&mut self, axiom: &Axiom) -> io::Result<()> {
        if axiom.kind().is_below_minimum_arity() {
            tracing::warn!(
                axiom = axiom.kind().name(),
                "skipping an axiom with fewer operands than required"
            );
            return Ok(());
        }
        self.visit_axiom(axiom)?;
        self.out.write_str("\n")
    }

    fn write_str(&mut self, s: &str) -> io::Result<()> {
        self.out.write_str(s)
    }

    fn open(&mut self, keyword: &str) -> io::Result<()> {
        self.write_str(keyword)?;
        self.write_str("(")
    }

    fn close(&mut self) -> io::Result<()> {
        self.write_str(")")
    }

    fn space(&mut self) -> io::Result<()> {
        self.write_str(" ")
    }

    fn write_iri_str(&mut self, iri: &str) -> io::Result<()> {
        match self.prefixes.abbreviate(iri) {
            Some(abbreviated) => self.write_str(&abbreviated),
            None => {
                self.write_str("<")?;
                self.write_str(iri)?;
                self.write_str(">")
            }
        }
    }

    fn write_list<'t, T: 't>(
        &mut self,
        items: impl IntoIterator<Item = &'t T>,
        mut write_item: impl FnMut(&mut Self, &T) -> io::Result<()>,
    ) -> io::Result<()> {
        for (i, item) in items.into_iter().enumerate() {
            if i > 0 {
                self.space()?;
            }
            write_item(self, item)?;
        }
        Ok(())
    }

    /// Writes the operands of an n-ary axiom, the focused entity first if there are two of them.
    fn write_operands<T: Orderable>(
        &mut self,
        operands: &BTreeSet<T>,
        write_item: impl FnMut(&mut Self, &T) -> io::Result<()>,
    ) -> io::Result<()> {
        let mut ordered = operands.iter().collect::<Vec<_>>();
        if let (Some(focus), [first, second]) = (&self.focus, ordered.as_slice()) {
            if first.as_entity().as_ref() != Some(focus)
                && second.as_entity().as_ref() == Some(focus)
            {
                ordered.swap(0, 1);
            }
        }
        self.write_list(ordered, write_item)
    }

    fn write_annotations(&mut self, annotations: &BTreeSet<Annotation>) -> io::Result<()> {
        for annotation in annotations {
            self.visit_annotation(annotation)?;
            self.space()?;
        }
        Ok(())
    }

    fn write_class_expressions(
        &mut self,
        keyword: &str,
        operands: &BTreeSet<ClassExpression>,
    ) -> io::Result<()> {
        if let (1, Some(operand)) = (operands.len(), operands.first()) {
            return self.visit_class_expression(operand);
        }
        self.open(keyword)?;
        self.write_list(operands, Self::visit_class_expression)?;
        self.close()
    }

    fn write_data_ranges(&mut self, keyword: &str, operands: &BTreeSet<DataRange>) -> io::Result<()> {
        if let (1, Some(operand)) = (operands.len(), operands.first()) {
            return self.visit_data_range(operand);
        }
        self.open(keyword)?;
        self.write_list(operands, Self::visit_data_range)?;
        self.close()
    }

    fn write_object_restriction(
        &mut self,
        keyword: &str,
        property: &ObjectPropertyExpression,
        filler: &ClassExpression,
    ) -> io::Result<()> {
        self.open(keyword)?;
        self.visit_object_property_expression(property)?;
        self.space()?;
        self.visit_class_expression(filler)?;
        self.close()
    }

    fn write_data_restriction(
        &mut self,
        keyword: &str,
        property: &DataProperty,
        filler: &DataRange,
    ) -> io::Result<()> {
        self.open(keyword)?;
        self.visit_data_property(property)?;
        self.space()?;
        self.visit_data_range(filler)?;
        self.close()
    }

    fn write_object_cardinality(
        &mut self,
        keyword: &str,
        cardinality: u32,
        property: &ObjectPropertyExpression,
        filler: Option<&ClassExpression>,
    ) -> io::Result<()> {
        self.open(keyword)?;
        self.write_str(&cardinality.to_string())?;
        self.space()?;
        self.visit_object_property_expression(property)?;
        if let Some(filler) = filler {
            self.space()?;
            self.visit_class_expression(filler)?;
        }
        self.close()
    }

    fn write_data_cardinality(
        &mut self,
        keyword: &str,
        cardinality: u32,
        property: &DataProperty,
        filler: Option<&DataRange>,
    ) -> io::Result<()> {
        self.open(keyword)?;
        self.write_str(&cardinality.to_string())?;
        self.space()?;
        self.visit_data_property(property)?;
        if let Some(filler) = filler {
            self.space()?;
            self.visit_data_range(filler)?;
        }
        self.close()
    }

    fn write_axiom_kind(&mut self, kind: &AxiomKind) -> io::Result<()> {
        match kind {
            AxiomKind::Declaration(entity) => self.visit_entity(entity),
            AxiomKind::SubClassOf {
                sub_class,
                super_class,
            } => {
                self.visit_class_expression(sub_class)?;
                self.space()?;
                self.visit_class_expression(super_class)
            }
            AxiomKind::EquivalentClasses(operands) | AxiomKind::DisjointClasses(operands) => {
                self.write_operands(operands, Self::visit_class_expression)
            }
            AxiomKind::DisjointUnion {
                class,
                disjoint_classes,
            } => {
                self.visit_class(class)?;
                self.space()?;
                self.write_list(disjoint_classes, Self::visit_class_expression)
            }
            AxiomKind::SubObjectPropertyOf {
                sub_property,
                super_property,
            } => {
                self.visit_object_property_expression(sub_property)?;
                self.space()?;
                self.visit_object_property_expression(super_property)
            }
            AxiomKind::SubPropertyChainOf {
                property_chain,
                super_property,
            } => {
                self.open("ObjectPropertyChain")?;
                self.write_list(property_chain, Self::visit_object_property_expression)?;
                self.close()?;
                self.space()?;
                self.visit_object_property_expression(super_property)
            }
            AxiomKind::EquivalentObjectProperties(operands)
            | AxiomKind::DisjointObjectProperties(operands) => {
                self.write_operands(operands, Self::visit_object_property_expression)
            }
            AxiomKind::InverseObjectProperties(first, second) => {
                self.visit_object_property_expression(first)?;
                self.space()?;
                self.visit_object_property_expression(second)
            }
            AxiomKind::ObjectPropertyDomain {
                property,
                domain: class,
            }
            | AxiomKind::ObjectPropertyRange {
                property,
                range: class,
            } => {
                self.visit_object_property_expression(property)?;
                self.space()?;
                self.visit_class_expression(class)
            }
            AxiomKind::FunctionalObjectProperty(property)
            | AxiomKind::InverseFunctionalObjectProperty(property)
            | AxiomKind::ReflexiveObjectProperty(property)
            | AxiomKind::IrreflexiveObjectProperty(property)
            | AxiomKind::SymmetricObjectProperty(property)
            | AxiomKind::AsymmetricObjectProperty(property)
            | AxiomKind::TransitiveObjectProperty(property) => {
                self.visit_object_property_expression(property)
            }
            AxiomKind::SubDataPropertyOf {
                sub_property,
                super_property,
            } => {
                self.visit_data_property(sub_property)?;
                self.space()?;
                self.visit_data_property(super_property)
            }
            AxiomKind::EquivalentDataProperties(operands)
            | AxiomKind::DisjointDataProperties(operands) => {
                self.write_operands(operands, Self::visit_data_property)
            }
            AxiomKind::DataPropertyDomain { property, domain } => {
                self.visit_data_property(property)?;
                self.space()?;
                self.visit_class_expression(domain)
            }
            AxiomKind::DataPropertyRange { property, range } => {
                self.visit_data_property(property)?;
                self.space()?;
                self.visit_data_range(range)
            }
            AxiomKind::FunctionalDataProperty(property) => self.visit_data_property(property),
            AxiomKind::DatatypeDefinition {
                datatype,
                data_range,
            } => {
                self.visit_datatype(datatype)?;
                self.space()?;
                self.visit_data_range(data_range)
            }
            AxiomKind::HasKey {
                class_expression,
                object_properties,
                data_properties,
            } => {
                self.visit_class_expression(class_expression)?;
                self.write_str(" (")?;
                self.write_list(object_properties, Self::visit_object_property_expression)?;
                self.write_str(") (")?;
                self.write_list(data_properties, Self::visit_data_property)?;
                self.close()
            }
            AxiomKind::SameIndividual(individuals)
            | AxiomKind::DifferentIndividuals(individuals) => {
                self.write_operands(individuals, Self::visit_individual)
            }
            AxiomKind::ClassAssertion {
                class_expression,
                individual,
            } => {
                self.visit_class_expression(class_expression)?;
                self.space()?;
                self.visit_individual(individual)
            }
            AxiomKind::ObjectPropertyAssertion {
                property,
                source,
                target,
            }
            | AxiomKind::NegativeObjectPropertyAssertion {
                property,
                source,
                target,
            } => {
                self.visit_object_property_expression(property)?;
                self.space()?;
                self.visit_individual(source)?;
                self.space()?;
                self.visit_individual(target)
            }
            AxiomKind::DataPropertyAssertion {
                property,
                source,
                target,
            }
            | AxiomKind::NegativeDataPropertyAssertion {
                property,
                source,
                target,
            } => {
                self.visit_data_property(property)?;
                self.space()?;
                self.visit_individual(source)?;
                self.space()?;
                self.visit_literal(target)
            }
            AxiomKind::AnnotationAssertion {
                property,
                subject,
                value,
            } => {
                self.visit_annotation_property(property)?;
                self.space()?;
                self.visit_annotation_subject(subject)?;
                self.space()?;
                self.visit_annotation_value(value)
            }
            AxiomKind::SubAnnotationPropertyOf {
                sub_property,
                super_property,
            } => {
                self.visit_annotation_property(sub_property)?;
                self.space()?;
                self.visit_annotation_property(super_property)
            }
            AxiomKind::AnnotationPropertyDomain {
                property,
                domain: iri,
            }
            | AxiomKind::AnnotationPropertyRange {
                property,
                range: iri,
            } => {
                self.visit_annotation_property(property)?;
                self.space()?;
                self.visit_iri(iri)
            }
            AxiomKind::Rule(rule) => self.visit_rule(rule),
        }
    }
}

impl<W: Write> Visitor for ObjectRenderer<'_, W> {
    type Error = io::Error;

    fn visit_axiom(&mut self, axiom: &Axiom) -> io::Result<()> {
        self.open(axiom.kind().name())?;
        self.write_annotations(axiom.annotations())?;
        self.write_axiom_kind(axiom.kind())?;
        self.close()
    }

    fn visit_annotation(&mut self, annotation: &Annotation) -> io::Result<()> {
        self.open("Annotation")?;
        self.write_annotations(annotation.annotations())?;
        self.visit_annotation_property(annotation.property())?;
        self.space()?;
        self.visit_annotation_value(annotation.value())?;
        self.close()
    }

    fn visit_annotation_subject(&mut self, subject: &AnnotationSubject) -> io::Result<()> {
        match subject {
            AnnotationSubject::Iri(iri) => self.visit_iri(iri),
            AnnotationSubject::Anonymous(individual) => self.visit_anonymous_individual(individual),
        }
    }

    fn visit_annotation_value(&mut self, value: &AnnotationValue) -> io::Result<()> {
        match value {
            AnnotationValue::Iri(iri) => self.visit_iri(iri),
            AnnotationValue::Anonymous(individual) => self.visit_anonymous_individual(individual),
            AnnotationValue::Literal(literal) => self.visit_literal(literal),
        }
    }

    fn visit_class_expression(&mut self, expression: &ClassExpression) -> io::Result<()> {
        let qualified = expression.is_qualified();
        match expression {
            ClassExpression::Class(class) => self.visit_class(class),
            ClassExpression::ObjectIntersectionOf(operands) => {
                self.write_class_expressions("ObjectIntersectionOf", operands)
            }
            ClassExpression::ObjectUnionOf(operands) => {
                self.write_class_expressions("ObjectUnionOf", operands)
            }
            ClassExpression::ObjectComplementOf(operand) => {
                self.open("ObjectComplementOf")?;
                self.visit_class_expression(operand)?;
                self.close()
            }
            ClassExpression::ObjectOneOf(individuals) => {
                self.open("ObjectOneOf")?;
                self.write_list(individuals, Self::visit_individual)?;
                self.close()
            }
            ClassExpression::ObjectSomeValuesFrom { property, filler } => {
                self.write_object_restriction("ObjectSomeValuesFrom", property, filler)
            }
            ClassExpression::ObjectAllValuesFrom { property, filler } => {
                self.write_object_restriction("ObjectAllValuesFrom", property, filler)
            }
            ClassExpression::ObjectHasValue {
                property,
                individual,
            } => {
                self.open("ObjectHasValue")?;
                self.visit_object_property_expression(property)?;
                self.space()?;
                self.visit_individual(individual)?;
                self.close()
            }
            ClassExpression::ObjectHasSelf(property) => {
                self.open("ObjectHasSelf")?;
                self.visit_object_property_expression(property)?;
                self.close()
            }
            ClassExpression::ObjectMinCardinality {
                cardinality,
                property,
                filler,
            } => self.write_object_cardinality(
                "ObjectMinCardinality",
                *cardinality,
                property,
                qualified.then_some(&**filler),
            ),
            ClassExpression::ObjectMaxCardinality {
                cardinality,
                property,
                filler,
            } => self.write_object_cardinality(
                "ObjectMaxCardinality",
                *cardinality,
                property,
                qualified.then_some(&**filler),
            ),
            ClassExpression::ObjectExactCardinality {
                cardinality,
                property,
                filler,
            } => self.write_object_cardinality(
                "ObjectExactCardinality",
                *cardinality,
                property,
                qualified.then_some(&**filler),
            ),
            ClassExpression::DataSomeValuesFrom { property, filler } => {
                self.write_data_restriction("DataSomeValuesFrom", property, filler)
            }
            ClassExpression::DataAllValuesFrom { property, filler } => {
                self.write_data_restriction("DataAllValuesFrom", property, filler)
            }
            ClassExpression::DataHasValue { property, value } => {
                self.open("DataHasValue")?;
                self.visit_data_property(property)?;
                self.space()?;
                self.visit_literal(value)?;
                self.close()
            }
            ClassExpression::DataMinCardinality {
                cardinality,
                property,
                filler,
            } => self.write_data_cardinality(
                "DataMinCardinality",
                *cardinality,
                property,
                qualified.then_some(filler),
            ),
            ClassExpression::DataMaxCardinality {
                cardinality,
                property,
                filler,
            } => self.write_data_cardinality(
                "DataMaxCardinality",
                *cardinality,
                property,
                qualified.then_some(filler),
            ),
            ClassExpression::DataExactCardinality {
                cardinality,
                property,
                filler,
            } => self.write_data_cardinality(
                "DataExactCardinality",
                *cardinality,
                property,
                qualified.then_some(filler),
            ),
        }
    }

    fn visit_object_property_expression(
        &mut self,
        expression: &ObjectPropertyExpression,
    ) -> io::Result<()> {
        match expression {
            ObjectPropertyExpression::ObjectProperty(property) => {
                self.visit_object_property(property)
            }
            ObjectPropertyExpression::ObjectInverseOf(property) => {
                self.open("ObjectInverseOf")?;
                self.visit_object_property(property)?;
                self.close()
            }
        }
    }

    fn visit_data_range(&mut self, range: &DataRange) -> io::Result<()> {
        match range {
            DataRange::Datatype(datatype) => self.visit_datatype(datatype),
            DataRange::DataIntersectionOf(operands) => {
                self.write_data_ranges("DataIntersectionOf", operands)
            }
            DataRange::DataUnionOf(operands) => self.write_data_ranges("DataUnionOf", operands),
            DataRange::DataComplementOf(operand) => {
                self.open("DataComplementOf")?;
                self.visit_data_range(operand)?;
                self.close()
            }
            DataRange::DataOneOf(literals) => {
                self.open("DataOneOf")?;
                self.write_list(literals, Self::visit_literal)?;
                self.close()
            }
            DataRange::DatatypeRestriction {
                datatype,
                restrictions,
            } => {
                self.open("DatatypeRestriction")?;
                self.visit_datatype(datatype)?;
                for restriction in restrictions {
                    self.space()?;
                    self.visit_facet_restriction(restriction)?;
                }
                self.close()
            }
        }
    }

    fn visit_facet_restriction(&mut self, restriction: &FacetRestriction) -> io::Result<()> {
        self.visit_iri(restriction.facet())?;
        self.space()?;
        self.visit_literal(restriction.value())
    }

    fn visit_individual(&mut self, individual: &Individual) -> io::Result<()> {
        match individual {
            Individual::Named(individual) => self.visit_named_individual(individual),
            Individual::Anonymous(individual) => self.visit_anonymous_individual(individual),
        }
    }

    /// Entities are written with their kind, as in declarations.
    fn visit_entity(&mut self, entity: &Entity) -> io::Result<()> {
        self.open(entity.entity_type().keyword())?;
        self.visit_iri(entity.iri())?;
        self.close()
    }

    fn visit_class(&mut self, class: &OwlClass) -> io::Result<()> {
        self.visit_iri(class.iri())
    }

    fn visit_object_property(&mut self, property: &ObjectProperty) -> io::Result<()> {
        self.visit_iri(property.iri())
    }

    fn visit_data_property(&mut self, property: &DataProperty) -> io::Result<()> {
        self.visit_iri(property.iri())
    }

    fn visit_annotation_property(&mut self, property: &AnnotationProperty) -> io::Result<()> {
        self.visit_iri(property.iri())
    }

    fn visit_datatype(&mut self, datatype: &Datatype) -> io::Result<()> {
        self.visit_iri(datatype.iri())
    }

    fn visit_named_individual(&mut self, individual: &NamedIndividual) -> io::Result<()> {
        self.visit_iri(individual.iri())
    }

    fn visit_anonymous_individual(&mut self, individual: &AnonymousIndividual) -> io::Result<()> {
        let name = format!("_:{}", self.anonymous_names.name(individual));
        self.write_str(&name)
    }

    fn visit_literal(&mut self, literal: &OwlLiteral) -> io::Result<()> {
        let mut escaped = String::with_capacity(literal.value().len() + 2);
        escaped.push('"');
        for c in literal.value().chars() {
            if matches!(c, '"' | '\\') {
                escaped.push('\\');
            }
            escaped.push(c);
        }
        escaped.push('"');
        self.out.write_verbatim(&escaped)?;
        if let Some(language) = literal.language() {
            self.write_str("@")?;
            self.write_str(language)
        } else if self.explicit_string_typing || literal.datatype() != xsd::STRING {
            self.write_str("^^")?;
            self.write_iri_str(literal.datatype().as_str())
        } else {
            Ok(())
        }
    }

    fn visit_iri(&mut self, iri: &NamedNode) -> io::Result<()> {
        self.write_iri_str(iri.as_str())
    }

    fn visit_rule(&mut self, rule: &Rule) -> io::Result<()> {
        self.open("Body")?;
        self.write_list(rule.body(), Self::visit_atom)?;
        self.write_str(") ")?;
        self.open("Head")?;
        self.write_list(rule.head(), Self::visit_atom)?;
        self.close()
    }

    fn visit_atom(&mut self, atom: &Atom) -> io::Result<()> {
        match atom {
            Atom::Class {
                class_expression,
                argument,
            } => {
                self.open("ClassAtom")?;
                self.visit_class_expression(class_expression)?;
                self.space()?;
                self.visit_i_argument(argument)?;
            }
            Atom::DataRange {
                data_range,
                argument,
            } => {
                self.open("DataRangeAtom")?;
                self.visit_data_range(data_range)?;
                self.space()?;
                self.visit_d_argument(argument)?;
            }
            Atom::ObjectProperty {
                property,
                subject,
                object,
            } => {
                self.open("ObjectPropertyAtom")?;
                self.visit_object_property_expression(property)?;
                self.space()?;
                self.visit_i_argument(subject)?;
                self.space()?;
                self.visit_i_argument(object)?;
            }
            Atom::DataProperty {
                property,
                subject,
                object,
            } => {
                self.open("DataPropertyAtom")?;
                self.visit_data_property(property)?;
                self.space()?;
                self.visit_i_argument(subject)?;
                self.space()?;
                self.visit_d_argument(object)?;
            }
            Atom::BuiltIn {
                predicate,
                arguments,
            } => {
                self.open("BuiltInAtom")?;
                self.visit_iri(predicate)?;
                for argument in arguments {
                    self.space()?;
                    self.visit_d_argument(argument)?;
                }
            }
            Atom::SameIndividual(first, second) => {
                self.open("SameIndividualAtom")?;
                self.visit_i_argument(first)?;
                self.space()?;
                self.visit_i_argument(second)?;
            }
            Atom::DifferentIndividuals(first, second) => {
                self.open("DifferentIndividualsAtom")?;
                self.visit_i_argument(first)?;
                self.space()?;
                self.visit_i_argument(second)?;
            }
        }
        self.close()
    }

    fn visit_i_argument(&mut self, argument: &IArgument) -> io::Result<()> {
        match argument {
            IArgument::Individual(individual) => self.visit_individual(individual),
            IArgument::Variable(variable) => self.visit_variable(variable),
        }
    }

    fn visit_d_argument(&mut self, argument: &DArgument) -> io::Result<()> {
        match argument {
            DArgument::Literal(literal) => self.visit_literal(literal),
            DArgument::Variable(variable) => self.visit_variable(variable),
        }
    }

    fn visit_variable(&mut self, variable: &SwrlVariable) -> io::Result<()> {
        self.open("Variable")?;
        self.visit_iri(variable.iri())?;
        self.close()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node_id::NodeId;
    use oxrdf::vocab::rdfs;

    fn iri(name: &str) -> NamedNode {
        NamedNode::new_unchecked(format!("http://example.com/o#{name}"))
    }

    fn render_axiom(axiom: &Axiom, focus: Option<&Entity>) -> String {
        let mut serializer = FunctionalSyntaxSerializer::new()
            .with_prefix("", "http://example.com/o#")
            .unwrap()
            .for_writer(Vec::new());
        match focus {
            Some(focus) => serializer.serialize_axiom_about(axiom, focus).unwrap(),
            None => serializer.serialize_axiom(axiom).unwrap(),
        }
        String::from_utf8(serializer.finish().unwrap()).unwrap()
    }

    #[test]
    fn literal_escaping() {
        let axiom = Axiom::annotation_assertion(
            rdfs::COMMENT.into(),
            iri("A"),
            OwlLiteral::new_simple_literal("say \"hi\" \\ bye"),
        );
        assert_eq!(
            render_axiom(&axiom, None),
            "AnnotationAssertion(rdfs:comment :A \"say \\\"hi\\\" \\\\ bye\")\n"
        );
    }

    #[test]
    fn language_tags_and_datatypes() {
        let axiom = Axiom::data_property_assertion(
            DataProperty::new(iri("p")),
            Individual::named(iri("i")),
            OwlLiteral::new_typed_literal("1", xsd::INTEGER),
        );
        assert_eq!(
            render_axiom(&axiom, None),
            "DataPropertyAssertion(:p :i \"1\"^^xsd:integer)\n"
        );
        let axiom = Axiom::annotation_assertion(
            rdfs::LABEL.into(),
            iri("A"),
            OwlLiteral::new_language_tagged_literal("chat", "fr").unwrap(),
        );
        assert_eq!(
            render_axiom(&axiom, None),
            "AnnotationAssertion(rdfs:label :A \"chat\"@fr)\n"
        );
    }

    #[test]
    fn focused_operand_goes_first() {
        let a = OwlClass::new(iri("A"));
        let b = OwlClass::new(iri("B"));
        let axiom = Axiom::equivalent_classes([a.clone().into(), b.clone().into()]);
        assert_eq!(render_axiom(&axiom, None), "EquivalentClasses(:A :B)\n");
        assert_eq!(
            render_axiom(&axiom, Some(&b.into())),
            "EquivalentClasses(:B :A)\n"
        );
        let c = OwlClass::new(iri("C"));
        let d = OwlClass::new(iri("D"));
        let axiom = Axiom::disjoint_classes([a.into(), c.clone().into(), d.into()]);
        assert_eq!(
            render_axiom(&axiom, Some(&c.into())),
            "DisjointClasses(:A :C :D)\n"
        );
    }

    #[test]
    fn unqualified_cardinalities_omit_the_filler() {
        let p = ObjectProperty::new(iri("p"));
        let axiom = Axiom::subclass_of(
            OwlClass::new(iri("A")).into(),
            ClassExpression::min_cardinality(2, p.clone(), None),
        );
        assert_eq!(
            render_axiom(&axiom, None),
            "SubClassOf(:A ObjectMinCardinality(2 :p))\n"
        );
        let axiom = Axiom::subclass_of(
            OwlClass::new(iri("A")).into(),
            ClassExpression::exact_cardinality(1, p, Some(OwlClass::new(iri("B")).into())),
        );
        assert_eq!(
            render_axiom(&axiom, None),
            "SubClassOf(:A ObjectExactCardinality(1 :p :B))\n"
        );
    }

    #[test]
    fn single_operand_intersections_are_flattened() {
        let axiom = Axiom::subclass_of(
            OwlClass::new(iri("A")).into(),
            ClassExpression::intersection_of([OwlClass::new(iri("B")).into()]),
        );
        assert_eq!(render_axiom(&axiom, None), "SubClassOf(:A :B)\n");
    }

    #[test]
    fn annotated_axioms() {
        let axiom = Axiom::subclass_of(
            OwlClass::new(iri("A")).into(),
            OwlClass::new(iri("B")).into(),
        )
        .with_annotations([Annotation::new(
            rdfs::COMMENT.into(),
            OwlLiteral::new_simple_literal("c"),
        )]);
        assert_eq!(
            render_axiom(&axiom, None),
            "SubClassOf(Annotation(rdfs:comment \"c\") :A :B)\n"
        );
    }

    #[test]
    fn anonymous_individuals_are_valid_names() {
        let axiom = Axiom::class_assertion(
            OwlClass::new(iri("A")).into(),
            AnonymousIndividual::new(NodeId::new("b 1")).into(),
        );
        assert_eq!(render_axiom(&axiom, None), "ClassAssertion(:A _:b1)\n");
    }

    #[test]
    fn entity_index_groups_axioms_by_entity() {
        let a = Entity::from(OwlClass::new(iri("A")));
        let mut ontology = Ontology::new(Some(iri("")));
        ontology.add_axioms([
            Axiom::declaration(OwlClass::new(iri("A"))),
            Axiom::annotation_assertion(
                rdfs::LABEL.into(),
                iri("A"),
                OwlLiteral::new_simple_literal("a"),
            ),
            Axiom::subclass_of(
                OwlClass::new(iri("A")).into(),
                ClassExpression::complement_of(OwlClass::new(iri("A")).into()),
            ),
            Axiom::subclass_of(OwlClass::new(iri("A")).into(), OwlClass::new(iri("B")).into()),
        ]);
        let index = EntityIndex::new(&ontology);
        assert_eq!(index.sorted_axioms.len(), 4);
        assert_eq!(index.declarations[&a].len(), 1);
        assert_eq!(index.annotation_assertions[&iri("A")].len(), 1);
        assert_eq!(index.exact_signature[&a].len(), 1);
        assert!(!index.exact_signature.contains_key(&Entity::from(OwlClass::new(iri("B")))));
    }

    #[test]
    fn sanitized_anonymous_names_do_not_collide() {
        let mut serializer = FunctionalSyntaxSerializer::new()
            .with_prefix("", "http://example.com/o#")
            .unwrap()
            .for_writer(Vec::new());
        for id in ["a b", "ab", "a b", "a:b"] {
            serializer
                .serialize_axiom(&Axiom::class_assertion(
                    OwlClass::new(iri("A")).into(),
                    AnonymousIndividual::new(NodeId::new(id)).into(),
                ))
                .unwrap();
        }
        assert_eq!(
            String::from_utf8(serializer.finish().unwrap()).unwrap(),
            "ClassAssertion(:A _:ab)\nClassAssertion(:A _:ab-1)\nClassAssertion(:A _:ab)\nClassAssertion(:A _:ab-2)\n"
        );
    }

    #[test]
    fn indentation_preserves_literals() {
        let mut ontology = Ontology::new(Some(iri("")));
        ontology.add_axiom(Axiom::annotation_assertion(
            rdfs::COMMENT.into(),
            iri("A"),
            OwlLiteral::new_simple_literal("a\nb"),
        ));
        let mut serializer = FunctionalSyntaxSerializer::new()
            .with_config(SerializerConfig::new().indent(true))
            .for_writer(Vec::new());
        serializer.serialize_ontology(&ontology).unwrap();
        let text = String::from_utf8(serializer.finish().unwrap()).unwrap();
        assert!(text.contains("\n\tAnnotationAssertion(rdfs:comment :A \"a\nb\")\n"));
        assert!(text.ends_with("\n)\n"));
    }
}
