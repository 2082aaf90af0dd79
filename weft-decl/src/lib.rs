#![forbid(unsafe_code)]

use miette::SourceSpan;

pub type Span = SourceSpan;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Spanned<T> {
    pub span: Span,
    pub node: T,
}

impl<T> Spanned<T> {
    pub fn new(span: Span, node: T) -> Self {
        Self { span, node }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Spanned<U> {
        Spanned {
            span: self.span,
            node: f(self.node),
        }
    }
}

pub fn span(start: usize, len: usize) -> Span {
    SourceSpan::new(start.into(), len)
}

pub fn span_between(start: usize, end: usize) -> Span {
    debug_assert!(end >= start);
    span(start, end - start)
}

pub type Ident = Spanned<String>;

/// The explicit qualifier set written at a declaration site.
///
/// Both flags are fixed by the declaration and never change afterwards;
/// the checker only ever computes *views* over them.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Qualifiers {
    /// Declared `shared`: may be concurrently accessed by multiple threads.
    pub shared: bool,
    /// Declared `threadsafe`: self-synchronized (field) or safe to call on
    /// a shared receiver (method).
    pub threadsafe: bool,
}

impl Qualifiers {
    pub const NONE: Qualifiers = Qualifiers {
        shared: false,
        threadsafe: false,
    };
    pub const SHARED: Qualifiers = Qualifiers {
        shared: true,
        threadsafe: false,
    };
    pub const THREADSAFE: Qualifiers = Qualifiers {
        shared: false,
        threadsafe: true,
    };
    pub const SHARED_THREADSAFE: Qualifiers = Qualifiers {
        shared: true,
        threadsafe: true,
    };

    pub fn display(&self) -> &'static str {
        match (self.shared, self.threadsafe) {
            (false, false) => "<none>",
            (true, false) => "shared",
            (false, true) => "threadsafe",
            (true, true) => "shared threadsafe",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeclKind {
    Variable,
    Field,
    Method,
}

impl DeclKind {
    pub fn display(&self) -> &'static str {
        match self {
            DeclKind::Variable => "variable",
            DeclKind::Field => "field",
            DeclKind::Method => "method",
        }
    }
}

/// Index into the model's type table. Member tables stay owned by the
/// model; declarations and chains refer to types by id only.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeId(pub u32);

/// One named entity: a variable, a struct field, or a method.
///
/// `ty` is the declared type for variables and fields, and the returned
/// type for methods whose result can be chained into; `None` for
/// declarations of non-struct type (terminal steps).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Declaration {
    pub name: Ident,
    pub kind: DeclKind,
    pub qualifiers: Qualifiers,
    pub ty: Option<TypeId>,
}

impl Declaration {
    pub fn variable(name: Ident, qualifiers: Qualifiers, ty: Option<TypeId>) -> Self {
        Declaration {
            name,
            kind: DeclKind::Variable,
            qualifiers,
            ty,
        }
    }

    pub fn field(name: Ident, qualifiers: Qualifiers, ty: Option<TypeId>) -> Self {
        Declaration {
            name,
            kind: DeclKind::Field,
            qualifiers,
            ty,
        }
    }

    pub fn method(name: Ident, qualifiers: Qualifiers, returns: Option<TypeId>) -> Self {
        Declaration {
            name,
            kind: DeclKind::Method,
            qualifiers,
            ty: returns,
        }
    }
}

/// How a chain step uses the member it names.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccessKind {
    FieldRead,
    FieldAddr,
    MethodCall,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AccessStep {
    pub member: Ident,
    pub access: AccessKind,
}

impl AccessStep {
    pub fn read(member: Ident) -> Self {
        AccessStep {
            member,
            access: AccessKind::FieldRead,
        }
    }

    pub fn addr(member: Ident) -> Self {
        AccessStep {
            member,
            access: AccessKind::FieldAddr,
        }
    }

    pub fn call(member: Ident) -> Self {
        AccessStep {
            member,
            access: AccessKind::MethodCall,
        }
    }
}

/// Where a chain starts: a named declaration, or the synthetic `this`
/// inside a method body. A threadsafe method executes with a shared
/// receiver, so `this` is shared exactly when the method is threadsafe.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ChainRoot {
    Decl(Declaration),
    This {
        receiver: TypeId,
        method_threadsafe: bool,
    },
}

/// An ordered member-access chain `root.m1.m2...mk`, as lowered from a
/// source expression by the front end. Step indices reported in
/// violations are 1-based: step 1 is `m1`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AccessChain {
    pub root: ChainRoot,
    pub steps: Vec<AccessStep>,
}

impl AccessChain {
    pub fn from_root(root: ChainRoot) -> Self {
        AccessChain {
            root,
            steps: Vec::new(),
        }
    }

    pub fn rooted(decl: Declaration) -> Self {
        AccessChain {
            root: ChainRoot::Decl(decl),
            steps: Vec::new(),
        }
    }

    pub fn in_method_body(receiver: TypeId, method_threadsafe: bool) -> Self {
        AccessChain {
            root: ChainRoot::This {
                receiver,
                method_threadsafe,
            },
            steps: Vec::new(),
        }
    }

    pub fn step(mut self, step: AccessStep) -> Self {
        self.steps.push(step);
        self
    }

    pub fn read(self, member: Ident) -> Self {
        self.step(AccessStep::read(member))
    }

    pub fn addr(self, member: Ident) -> Self {
        self.step(AccessStep::addr(member))
    }

    pub fn call(self, member: Ident) -> Self {
        self.step(AccessStep::call(member))
    }
}
