//! The class registry: class names, inheritance, factories and the
//! binding table of every registered class.
//!
//! Lookups walk the parent chain from the most-derived class. The walk is
//! bounded by the number of registered classes, so a parent cycle is
//! reported as a `Bug` error instead of looping.
//!
//! No `RefCell` borrow is held while factories, initializers or bound
//! closures run, which lets native code re-enter the registry freely.

use std::cell::RefCell;
use std::hash::BuildHasherDefault;
use std::rc::Rc;

use indexmap::IndexMap;
use once_cell::unsync::OnceCell;
use rustc_hash::{FxHashMap, FxHasher};
use tracing::{debug, trace};
use var_core::{ErrorKind, ObjectRef, Value, VarError, VarResult};

use crate::bind::Binding;
use crate::type_info::{ClassInfo, MemberInfo, TypeInfo};

/// Creates a fresh, uninitialized instance of a class.
pub type Factory = Rc<dyn Fn() -> ObjectRef>;

type BindingTable = IndexMap<String, Rc<Binding>, BuildHasherDefault<FxHasher>>;

struct ClassEntry {
    info: Rc<ClassInfo>,
    factory: Factory,
    initializer: Option<Rc<Binding>>,
    bindings: BindingTable,
}

thread_local! {
    static GLOBAL: OnceCell<Rc<ClassRegistry>> = OnceCell::new();
}

fn not_registered(class_name: &str) -> VarError {
    VarError::attribute_error(format!("class \"{}\" isn't registered.", class_name))
}

/// Registered native classes.
#[derive(Default)]
pub struct ClassRegistry {
    classes: RefCell<FxHashMap<String, ClassEntry>>,
}

impl ClassRegistry {
    /// An empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// The registry of the running program, created on first use.
    pub fn global() -> Rc<ClassRegistry> {
        GLOBAL.with(|cell| {
            cell.get_or_init(|| {
                debug!("creating class registry");
                Rc::new(ClassRegistry::new())
            })
            .clone()
        })
    }

    /// Install `registry` as the program registry.
    ///
    /// Returns `false` when a registry already exists, in which case the
    /// existing one is kept.
    pub fn install(registry: Rc<ClassRegistry>) -> bool {
        GLOBAL.with(|cell| {
            let installed = cell.set(registry).is_ok();
            debug!(installed, "installing class registry");
            installed
        })
    }

    /// Register class `name` deriving from `parent` (empty for none).
    ///
    /// # Errors
    ///
    /// AttributeError when the name is already registered.
    pub fn register_class(
        &self,
        name: &str,
        parent: &str,
        factory: impl Fn() -> ObjectRef + 'static,
    ) -> VarResult<()> {
        let mut classes = self.classes.borrow_mut();
        if classes.contains_key(name) {
            return Err(VarError::attribute_error(format!(
                "class \"{}\" already exists.",
                name
            )));
        }
        classes.insert(
            name.to_string(),
            ClassEntry {
                info: Rc::new(ClassInfo {
                    name: name.to_string(),
                    parent: parent.to_string(),
                }),
                factory: Rc::new(factory),
                initializer: None,
                bindings: BindingTable::default(),
            },
        );
        debug!(class = name, parent, "registered class");
        Ok(())
    }

    /// Add a binding to its class.
    ///
    /// A binding named like its class is the class' initializer: it must be
    /// a static function returning nothing whose first parameter takes the
    /// instance.
    pub fn bind(&self, binding: impl Into<Binding>) -> VarResult<()> {
        let binding = Rc::new(binding.into());
        let class_name = binding.class_name().to_string();
        let name = binding.name().to_string();

        let mut classes = self.classes.borrow_mut();
        let entry = classes
            .get_mut(&class_name)
            .ok_or_else(|| not_registered(&class_name))?;
        if entry.bindings.contains_key(&name) {
            return Err(VarError::attribute_error(format!(
                "entry \"{}\" already exists on class \"{}\".",
                name, class_name
            )));
        }
        if name == class_name {
            check_initializer(&binding)?;
            entry.initializer = Some(binding.clone());
            trace!(class = %class_name, "recorded initializer");
        }
        trace!(class = %class_name, attribute = %name, kind = ?binding.kind(), "bound attribute");
        entry.bindings.insert(name, binding);
        Ok(())
    }

    /// The binding declared directly on `class_name`, ignoring parents.
    pub fn get_binding(&self, class_name: &str, name: &str) -> VarResult<Option<Rc<Binding>>> {
        let classes = self.classes.borrow();
        let entry = classes
            .get(class_name)
            .ok_or_else(|| not_registered(class_name))?;
        Ok(entry.bindings.get(name).cloned())
    }

    /// Look `name` up on `class_name`, then on its ancestors.
    pub fn find(&self, class_name: &str, name: &str) -> VarResult<Option<Rc<Binding>>> {
        let classes = self.classes.borrow();
        let mut current = class_name;
        for _ in 0..=classes.len() {
            let entry = classes
                .get(current)
                .ok_or_else(|| not_registered(current))?;
            if let Some(binding) = entry.bindings.get(name) {
                return Ok(Some(binding.clone()));
            }
            if entry.info.parent.is_empty() {
                return Ok(None);
            }
            current = &entry.info.parent;
        }
        Err(VarError::new(
            ErrorKind::Bug,
            format!("inheritance cycle reached from class \"{}\".", class_name),
        ))
    }

    /// Like [`find`](Self::find), but a miss is an AttributeError naming
    /// `class_name`.
    pub fn resolve(&self, class_name: &str, name: &str) -> VarResult<Rc<Binding>> {
        self.find(class_name, name)?.ok_or_else(|| {
            VarError::attribute_error(format!(
                "type {} has no attribute named \"{}\".",
                class_name, name
            ))
        })
    }

    /// Reflection metadata of `name` as seen from `class_name`
    pub fn member_info(&self, class_name: &str, name: &str) -> VarResult<MemberInfo> {
        Ok(self.resolve(class_name, name)?.member_info())
    }

    /// Parent class name, empty for a root class
    pub fn parent_of(&self, class_name: &str) -> VarResult<String> {
        Ok(self.class_info(class_name)?.parent.clone())
    }

    /// Metadata of the class itself
    pub fn class_info(&self, class_name: &str) -> VarResult<Rc<ClassInfo>> {
        let classes = self.classes.borrow();
        classes
            .get(class_name)
            .map(|entry| entry.info.clone())
            .ok_or_else(|| not_registered(class_name))
    }

    /// Whether `class_name` is registered
    pub fn is_registered(&self, class_name: &str) -> bool {
        self.classes.borrow().contains_key(class_name)
    }

    /// Whether `class_name` is `ancestor` or derives from it
    pub fn is_subclass(&self, class_name: &str, ancestor: &str) -> VarResult<bool> {
        let mut current = class_name.to_string();
        for _ in 0..=self.classes.borrow().len() {
            if current == ancestor {
                return Ok(true);
            }
            current = self.parent_of(&current)?;
            if current.is_empty() {
                return Ok(false);
            }
        }
        Err(VarError::new(
            ErrorKind::Bug,
            format!("inheritance cycle reached from class \"{}\".", class_name),
        ))
    }

    /// All registered class names, sorted
    pub fn class_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.classes.borrow().keys().cloned().collect();
        names.sort();
        names
    }

    /// Bindings declared directly on `class_name`, in declaration order
    pub fn bindings(&self, class_name: &str) -> VarResult<Vec<Rc<Binding>>> {
        let classes = self.classes.borrow();
        let entry = classes
            .get(class_name)
            .ok_or_else(|| not_registered(class_name))?;
        Ok(entry.bindings.values().cloned().collect())
    }

    /// Metadata of the bindings declared directly on `class_name`
    pub fn member_infos(&self, class_name: &str) -> VarResult<Vec<MemberInfo>> {
        Ok(self
            .bindings(class_name)?
            .iter()
            .map(|binding| binding.member_info())
            .collect())
    }

    /// The class' initializer, if it declared one
    pub fn initializer(&self, class_name: &str) -> VarResult<Option<Rc<Binding>>> {
        let classes = self.classes.borrow();
        let entry = classes
            .get(class_name)
            .ok_or_else(|| not_registered(class_name))?;
        Ok(entry.initializer.clone())
    }

    /// A fresh instance from the class factory, without running the
    /// initializer.
    pub fn instantiate(&self, class_name: &str) -> VarResult<ObjectRef> {
        let factory = {
            let classes = self.classes.borrow();
            classes
                .get(class_name)
                .map(|entry| entry.factory.clone())
                .ok_or_else(|| not_registered(class_name))?
        };
        Ok(factory())
    }

    /// Create an instance and run the initializer with the instance
    /// prepended to `args`.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::rc::Rc;
    /// use native_classes::ClassRegistry;
    /// use var_core::{Object, ObjectRef};
    ///
    /// struct Empty;
    ///
    /// impl Object for Empty {
    ///     fn class_name(&self) -> &'static str {
    ///         "Empty"
    ///     }
    /// }
    ///
    /// let registry = ClassRegistry::new();
    /// registry
    ///     .register_class("Empty", "", || -> ObjectRef { Rc::new(Empty) })
    ///     .unwrap();
    /// let instance = registry.construct("Empty", &[]).unwrap();
    /// assert_eq!(instance.class_name(), "Empty");
    /// ```
    pub fn construct(&self, class_name: &str, args: &[Value]) -> VarResult<ObjectRef> {
        let instance = self.instantiate(class_name)?;
        if let Some(initializer) = self.initializer(class_name)? {
            if let Binding::StaticFunc(init) = initializer.as_ref() {
                let mut full = Vec::with_capacity(args.len() + 1);
                full.push(Value::Object(instance.clone()));
                full.extend_from_slice(args);
                init.call(&full)?;
            }
        }
        trace!(class = class_name, "constructed instance");
        Ok(instance)
    }
}

fn check_initializer(binding: &Binding) -> VarResult<()> {
    let info = match binding {
        Binding::StaticFunc(func) => func.info(),
        _ => {
            return Err(VarError::attribute_error(format!(
                "attribute \"{}\" can't be the same as type name.",
                binding.name()
            )))
        }
    };
    if info.return_type != TypeInfo::Void {
        return Err(VarError::type_error(
            "constructor initializer must not return anything.",
        ));
    }
    let takes_instance = info.arg_count().unwrap_or(0) >= 1
        && info.arg_types.first().map_or(false, TypeInfo::is_object);
    if !takes_instance {
        return Err(VarError::type_error(
            "constructor initializer must take the instance as the first argument.",
        ));
    }
    Ok(())
}
