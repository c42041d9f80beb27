/// Type-name resolution
///
/// Turns type nodes into [`TypeMirror`]s. A simple name is looked up in
/// Java's order: the lexical scopes (type parameters and types declared in
/// this unit, innermost first), single-type imports, the current package,
/// on-demand imports, then `java.lang`. Packages are known from the run's
/// [`PackageIndex`](super::PackageIndex) and, for the JDK, from
/// [`JDK_PACKAGE_TYPES`]. An unresolved name is taken to be a member of the
/// current package.
use std::collections::{HashMap, HashSet};

use tracing::trace;
use tree_sitter::Node;

use crate::declarations::{ClassName, TypeMirror, WildcardBound};
use crate::extractors::java::JavaExtractor;

use super::helpers::{self, find_child};

/// Public types of `java.lang`, implicitly imported into every unit.
const JAVA_LANG_TYPES: &[&str] = &[
    "AbstractMethodError",
    "Appendable",
    "ArithmeticException",
    "ArrayIndexOutOfBoundsException",
    "ArrayStoreException",
    "AssertionError",
    "AutoCloseable",
    "Boolean",
    "Byte",
    "CharSequence",
    "Character",
    "Class",
    "ClassCastException",
    "ClassLoader",
    "ClassNotFoundException",
    "CloneNotSupportedException",
    "Cloneable",
    "Comparable",
    "Deprecated",
    "Double",
    "Enum",
    "Error",
    "Exception",
    "Float",
    "FunctionalInterface",
    "IllegalAccessException",
    "IllegalArgumentException",
    "IllegalMonitorStateException",
    "IllegalStateException",
    "IndexOutOfBoundsException",
    "InheritableThreadLocal",
    "Integer",
    "InterruptedException",
    "Iterable",
    "LinkageError",
    "Long",
    "Math",
    "Module",
    "NegativeArraySizeException",
    "NoSuchFieldException",
    "NoSuchMethodException",
    "NullPointerException",
    "Number",
    "NumberFormatException",
    "Object",
    "OutOfMemoryError",
    "Override",
    "Package",
    "Process",
    "ProcessBuilder",
    "Readable",
    "Record",
    "ReflectiveOperationException",
    "Runnable",
    "Runtime",
    "RuntimeException",
    "SafeVarargs",
    "SecurityException",
    "Short",
    "StackOverflowError",
    "StackTraceElement",
    "StrictMath",
    "String",
    "StringBuffer",
    "StringBuilder",
    "StringIndexOutOfBoundsException",
    "SuppressWarnings",
    "System",
    "Thread",
    "ThreadGroup",
    "ThreadLocal",
    "Throwable",
    "TypeNotPresentException",
    "UnsupportedOperationException",
    "VirtualMachineError",
    "Void",
];

/// Common public types of JDK packages, for on-demand imports such as
/// `import java.util.*;`.
const JDK_PACKAGE_TYPES: &[(&str, &[&str])] = &[
    (
        "java.io",
        &[
            "BufferedInputStream",
            "BufferedOutputStream",
            "BufferedReader",
            "BufferedWriter",
            "ByteArrayInputStream",
            "ByteArrayOutputStream",
            "Closeable",
            "DataInputStream",
            "DataOutputStream",
            "EOFException",
            "File",
            "FileInputStream",
            "FileNotFoundException",
            "FileOutputStream",
            "FileReader",
            "FileWriter",
            "Flushable",
            "IOException",
            "InputStream",
            "InputStreamReader",
            "ObjectInputStream",
            "ObjectOutputStream",
            "OutputStream",
            "OutputStreamWriter",
            "PrintStream",
            "PrintWriter",
            "Reader",
            "Serializable",
            "StringReader",
            "StringWriter",
            "UncheckedIOException",
            "Writer",
        ],
    ),
    ("java.math", &["BigDecimal", "BigInteger", "MathContext", "RoundingMode"]),
    (
        "java.net",
        &[
            "HttpURLConnection",
            "InetAddress",
            "InetSocketAddress",
            "MalformedURLException",
            "ServerSocket",
            "Socket",
            "URI",
            "URISyntaxException",
            "URL",
            "URLConnection",
        ],
    ),
    (
        "java.nio.file",
        &["DirectoryStream", "FileSystem", "Files", "Path", "Paths", "StandardOpenOption"],
    ),
    (
        "java.time",
        &[
            "Clock",
            "DayOfWeek",
            "Duration",
            "Instant",
            "LocalDate",
            "LocalDateTime",
            "LocalTime",
            "Month",
            "OffsetDateTime",
            "Period",
            "Year",
            "YearMonth",
            "ZoneId",
            "ZoneOffset",
            "ZonedDateTime",
        ],
    ),
    (
        "java.util",
        &[
            "AbstractList",
            "AbstractMap",
            "AbstractSet",
            "ArrayDeque",
            "ArrayList",
            "Arrays",
            "BitSet",
            "Calendar",
            "Collection",
            "Collections",
            "Comparator",
            "ConcurrentModificationException",
            "Date",
            "Deque",
            "EnumMap",
            "EnumSet",
            "Enumeration",
            "EventListener",
            "EventObject",
            "HashMap",
            "HashSet",
            "Hashtable",
            "IdentityHashMap",
            "Iterator",
            "LinkedHashMap",
            "LinkedHashSet",
            "LinkedList",
            "List",
            "ListIterator",
            "Locale",
            "Map",
            "NavigableMap",
            "NavigableSet",
            "NoSuchElementException",
            "Objects",
            "Optional",
            "PriorityQueue",
            "Properties",
            "Queue",
            "Random",
            "ResourceBundle",
            "Scanner",
            "Set",
            "SortedMap",
            "SortedSet",
            "Stack",
            "StringJoiner",
            "Timer",
            "TimerTask",
            "TreeMap",
            "TreeSet",
            "UUID",
            "Vector",
            "WeakHashMap",
        ],
    ),
    (
        "java.util.concurrent",
        &[
            "BlockingQueue",
            "Callable",
            "CompletableFuture",
            "ConcurrentHashMap",
            "ConcurrentLinkedQueue",
            "ConcurrentMap",
            "CopyOnWriteArrayList",
            "CountDownLatch",
            "ExecutionException",
            "Executor",
            "ExecutorService",
            "Executors",
            "Future",
            "LinkedBlockingQueue",
            "ScheduledExecutorService",
            "Semaphore",
            "ThreadPoolExecutor",
            "TimeUnit",
            "TimeoutException",
        ],
    ),
    (
        "java.util.function",
        &[
            "BiConsumer",
            "BiFunction",
            "BiPredicate",
            "BinaryOperator",
            "BooleanSupplier",
            "Consumer",
            "Function",
            "IntFunction",
            "IntPredicate",
            "Predicate",
            "Supplier",
            "ToIntFunction",
            "UnaryOperator",
        ],
    ),
    (
        "java.util.regex",
        &["Matcher", "Pattern", "PatternSyntaxException"],
    ),
    (
        "java.util.stream",
        &["Collector", "Collectors", "IntStream", "LongStream", "Stream", "StreamSupport"],
    ),
];

fn is_jdk_member(package_name: &str, simple_name: &str) -> bool {
    JDK_PACKAGE_TYPES
        .iter()
        .any(|(package, names)| *package == package_name && names.contains(&simple_name))
}

/// One lexical scope: a type body or a generic method.
#[derive(Debug, Clone, Default)]
pub(crate) struct Scope {
    type_parameters: HashSet<String>,
    types: HashMap<String, ClassName>,
}

impl Scope {
    pub fn declare_type(&mut self, simple_name: String, name: ClassName) {
        self.types.insert(simple_name, name);
    }

    pub fn declare_type_parameter(&mut self, name: String) {
        self.type_parameters.insert(name);
    }
}

/// How references to a declaration print, and its canonical name.
///
/// Member types hang off their enclosing type's path inside the package;
/// local types start a path of their own and have no canonical name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct TypePath {
    path: String,
    local: bool,
}

impl TypePath {
    pub fn top_level(simple_name: &str) -> Self {
        Self {
            path: simple_name.to_string(),
            local: false,
        }
    }

    pub fn local(simple_name: &str) -> Self {
        Self {
            path: simple_name.to_string(),
            local: true,
        }
    }

    pub fn member(&self, simple_name: &str) -> Self {
        Self {
            path: format!("{}.{}", self.path, simple_name),
            local: self.local,
        }
    }

    pub fn class_name(&self) -> ClassName {
        if self.local {
            ClassName::Qualified(self.path.clone())
        } else {
            ClassName::CurrentPackage(self.path.clone())
        }
    }

    pub fn canonical_name(&self, package_name: &str) -> Option<String> {
        match (self.local, package_name.is_empty()) {
            (true, _) => None,
            (false, true) => Some(self.path.clone()),
            (false, false) => Some(format!("{}.{}", package_name, self.path)),
        }
    }
}

/// Scope holding the unit's top-level type names.
pub(super) fn unit_scope(extractor: &JavaExtractor, program: Node) -> Scope {
    let mut scope = Scope::default();
    for child in program.children(&mut program.walk()) {
        if let Some(name) = declared_type_name(extractor, &child) {
            let path = TypePath::top_level(&name);
            scope.declare_type(name, path.class_name());
        }
    }
    scope
}

/// Scope of a type body: its type parameters and member types.
pub(super) fn type_scope(
    extractor: &JavaExtractor,
    declaration: &Node,
    path: &TypePath,
    simple_name: &str,
) -> Scope {
    let mut scope = Scope::default();
    if path.local {
        // A local type is not visible through any enclosing body scope.
        scope.declare_type(simple_name.to_string(), path.class_name());
    }
    declare_type_parameters(extractor, declaration, &mut scope);

    if let Some(body) = declaration.child_by_field_name("body") {
        for member in body.children(&mut body.walk()) {
            if let Some(name) = declared_type_name(extractor, &member) {
                let member_path = path.member(&name);
                scope.declare_type(name, member_path.class_name());
            }
        }
    }
    scope
}

/// Scope of a generic method or constructor.
pub(super) fn method_scope(extractor: &JavaExtractor, declaration: &Node) -> Scope {
    let mut scope = Scope::default();
    declare_type_parameters(extractor, declaration, &mut scope);
    scope
}

fn declare_type_parameters(extractor: &JavaExtractor, declaration: &Node, scope: &mut Scope) {
    let Some(parameters) = find_child(declaration, "type_parameters") else {
        return;
    };
    for parameter in parameters.children(&mut parameters.walk()) {
        if parameter.kind() != "type_parameter" {
            continue;
        }
        if let Some(name) = parameter
            .children(&mut parameter.walk())
            .find(|c| matches!(c.kind(), "type_identifier" | "identifier"))
        {
            scope.declare_type_parameter(extractor.get_node_text(&name));
        }
    }
}

/// Name of any type declaration node, including the kinds that are not
/// extracted (enums, records, annotation types).
pub(super) fn declared_type_name(extractor: &JavaExtractor, node: &Node) -> Option<String> {
    match node.kind() {
        "class_declaration"
        | "interface_declaration"
        | "enum_declaration"
        | "record_declaration"
        | "annotation_type_declaration" => node
            .child_by_field_name("name")
            .map(|name| extractor.get_node_text(&name)),
        _ => None,
    }
}

/// Resolve a type node.
pub(super) fn resolve_type(extractor: &JavaExtractor, node: &Node) -> TypeMirror {
    match node.kind() {
        "void_type" => TypeMirror::Void,
        "integral_type" | "floating_point_type" | "boolean_type" => {
            TypeMirror::Primitive(extractor.get_node_text(node))
        }
        "type_identifier" => resolve_simple_name(extractor, &extractor.get_node_text(node)),
        "scoped_type_identifier" => {
            TypeMirror::declared(resolve_dotted(extractor, &scoped_segments(extractor, node)))
        }
        "generic_type" => resolve_generic(extractor, node),
        "array_type" => {
            let element = node
                .child_by_field_name("element")
                .map(|element| resolve_type(extractor, &element))
                .unwrap_or(TypeMirror::Void);
            let dimensions = node
                .child_by_field_name("dimensions")
                .map(|d| helpers::count_dimensions(&d))
                .unwrap_or(1);
            element.array_of(dimensions)
        }
        "annotated_type" => resolve_annotated(extractor, node),
        "wildcard" => resolve_wildcard(extractor, node),
        other => {
            let text = extractor.get_node_text(node);
            trace!("unrecognized type node '{}' ({}), keeping its text", other, text);
            TypeMirror::declared(ClassName::CurrentPackage(text))
        }
    }
}

/// Resolve the first type child of `node`, if any.
pub(super) fn resolve_type_child(extractor: &JavaExtractor, node: &Node) -> Option<TypeMirror> {
    node.children(&mut node.walk())
        .find(|c| helpers::is_type_node(c.kind()))
        .map(|type_node| resolve_type(extractor, &type_node))
}

/// Resolve a simple name in type position.
pub(super) fn resolve_simple_name(extractor: &JavaExtractor, name: &str) -> TypeMirror {
    for scope in extractor.scopes().iter().rev() {
        if scope.type_parameters.contains(name) {
            return TypeMirror::TypeVariable(name.to_string());
        }
        if let Some(class_name) = scope.types.get(name) {
            return TypeMirror::declared(class_name.clone());
        }
    }
    TypeMirror::declared(resolve_outside_unit(extractor, name))
}

/// Resolve a simple class name, ignoring type parameters.
fn resolve_class_name(extractor: &JavaExtractor, name: &str) -> ClassName {
    extractor
        .scopes()
        .iter()
        .rev()
        .find_map(|scope| scope.types.get(name).cloned())
        .unwrap_or_else(|| resolve_outside_unit(extractor, name))
}

fn resolve_outside_unit(extractor: &JavaExtractor, name: &str) -> ClassName {
    if let Some(qualified) = extractor.imports().resolve(name) {
        return ClassName::Qualified(qualified.to_string());
    }
    let index = extractor.package_index();
    if index.contains(extractor.package_name(), name) {
        return ClassName::CurrentPackage(name.to_string());
    }
    if let Some(package_name) = extractor
        .imports()
        .on_demand()
        .iter()
        .find(|package| index.contains(package, name) || is_jdk_member(package, name))
    {
        return ClassName::Qualified(format!("{}.{}", package_name, name));
    }
    if JAVA_LANG_TYPES.contains(&name) {
        return ClassName::Qualified(format!("java.lang.{}", name));
    }
    ClassName::CurrentPackage(name.to_string())
}

/// Resolve a dotted name such as `Map.Entry` or `java.util.List`.
fn resolve_dotted(extractor: &JavaExtractor, segments: &[String]) -> ClassName {
    let Some((first, rest)) = segments.split_first() else {
        return ClassName::CurrentPackage(String::new());
    };
    if first.starts_with(|c: char| c.is_lowercase()) {
        return ClassName::Qualified(segments.join("."));
    }
    if rest.is_empty() {
        return resolve_class_name(extractor, first);
    }
    match resolve_class_name(extractor, first) {
        ClassName::Qualified(base) => ClassName::Qualified(format!("{}.{}", base, rest.join("."))),
        ClassName::CurrentPackage(base) => {
            ClassName::CurrentPackage(format!("{}.{}", base, rest.join(".")))
        }
    }
}

/// Resolve an annotation name (`Override`, `javax.annotation.Nonnull`).
pub(super) fn resolve_annotation_name(extractor: &JavaExtractor, name: &str) -> ClassName {
    let segments: Vec<String> = name.split('.').map(str::to_string).collect();
    resolve_dotted(extractor, &segments)
}

/// Identifier segments of a scoped type, ignoring annotations and type
/// arguments on the qualifying parts.
fn scoped_segments(extractor: &JavaExtractor, node: &Node) -> Vec<String> {
    let mut segments = Vec::new();
    for child in node.children(&mut node.walk()) {
        match child.kind() {
            "type_identifier" | "identifier" => segments.push(extractor.get_node_text(&child)),
            "scoped_type_identifier" | "generic_type" => {
                segments.extend(scoped_segments(extractor, &child))
            }
            _ => {}
        }
    }
    segments
}

fn resolve_generic(extractor: &JavaExtractor, node: &Node) -> TypeMirror {
    let mut base = None;
    let mut type_arguments = Vec::new();
    for child in node.children(&mut node.walk()) {
        match child.kind() {
            "type_identifier" | "scoped_type_identifier" => {
                base = Some(resolve_type(extractor, &child));
            }
            "type_arguments" => {
                type_arguments = child
                    .children(&mut child.walk())
                    .filter(|arg| arg.kind() == "wildcard" || helpers::is_type_node(arg.kind()))
                    .map(|arg| resolve_type(extractor, &arg))
                    .collect();
            }
            _ => {}
        }
    }

    match base {
        Some(TypeMirror::Declared {
            name, annotations, ..
        }) => TypeMirror::Declared {
            name,
            type_arguments,
            annotations,
        },
        Some(other) => other,
        None => TypeMirror::declared(ClassName::CurrentPackage(extractor.get_node_text(node))),
    }
}

fn resolve_annotated(extractor: &JavaExtractor, node: &Node) -> TypeMirror {
    let mut annotations = Vec::new();
    let mut inner = None;
    for child in node.children(&mut node.walk()) {
        match child.kind() {
            "marker_annotation" | "annotation" => {
                if let Some(name) = child.child_by_field_name("name") {
                    annotations.push(resolve_annotation_name(
                        extractor,
                        &extractor.get_node_text(&name),
                    ));
                }
            }
            kind if helpers::is_type_node(kind) => inner = Some(resolve_type(extractor, &child)),
            _ => {}
        }
    }

    match inner {
        Some(TypeMirror::Declared {
            name,
            type_arguments,
            annotations: existing,
        }) => TypeMirror::Declared {
            name,
            type_arguments,
            annotations: annotations.into_iter().chain(existing).collect(),
        },
        Some(other) => other,
        None => TypeMirror::declared(ClassName::CurrentPackage(extractor.get_node_text(node))),
    }
}

fn resolve_wildcard(extractor: &JavaExtractor, node: &Node) -> TypeMirror {
    let mut is_super = false;
    let mut bound = None;
    for child in node.children(&mut node.walk()) {
        match child.kind() {
            "super" => is_super = true,
            kind if helpers::is_type_node(kind) => {
                bound = Some(Box::new(resolve_type(extractor, &child)))
            }
            _ => {}
        }
    }
    TypeMirror::Wildcard(bound.map(|bound| {
        if is_super {
            WildcardBound::Super(bound)
        } else {
            WildcardBound::Extends(bound)
        }
    }))
}
