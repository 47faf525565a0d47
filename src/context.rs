//! JavaScript execution context
//!
//! The Context owns every object and is the runtime core the builtins
//! are written against: object creation, internal-class queries, raw
//! property table access, array storage and function invocation are all
//! methods here. Conversions live in `runtime::conversion` and calls in
//! `runtime::call`, as further `impl Context` blocks.

use crate::builtins;
use crate::error::{ErrorKind, JsError, JsResult};
use crate::gc::{Heap, MemoryStats};
use crate::runtime::array::JSArray;
use crate::runtime::function::{CFunction, NativeFn};
use crate::runtime::object::{InternalClass, JSObject, ObjectData, PropFlags, PropertyValue};
use crate::runtime::string::{JSString, is_array_index};
use crate::util::dtoa::u32_to_string;
use crate::util::f64_to_uint32;
use crate::value::{ObjectId, Value};
use std::collections::HashSet;
use tracing::{debug, trace};

/// Context configuration
#[derive(Debug, Clone)]
pub struct ContextConfig {
    /// Maximum nesting of native calls
    pub max_recursion: usize,
    /// Number of object slots reserved up front
    pub initial_capacity: usize,
}

impl ContextConfig {
    /// Default max recursion
    pub const DEFAULT_MAX_RECURSION: usize = 512;
    /// Default object capacity
    pub const DEFAULT_INITIAL_CAPACITY: usize = 256;

    pub fn with_max_recursion(mut self, max_recursion: usize) -> Self {
        self.max_recursion = max_recursion;
        self
    }

    pub fn with_initial_capacity(mut self, initial_capacity: usize) -> Self {
        self.initial_capacity = initial_capacity;
        self
    }
}

impl Default for ContextConfig {
    fn default() -> Self {
        ContextConfig {
            max_recursion: Self::DEFAULT_MAX_RECURSION,
            initial_capacity: Self::DEFAULT_INITIAL_CAPACITY,
        }
    }
}

/// Well-known objects created before any builtin is installed
#[derive(Debug, Clone, Copy)]
pub struct Intrinsics {
    pub object_prototype: ObjectId,
    pub function_prototype: ObjectId,
    pub array_prototype: ObjectId,
    pub boolean_prototype: ObjectId,
    pub number_prototype: ObjectId,
    pub string_prototype: ObjectId,
    pub error_prototype: ObjectId,
    pub type_error_prototype: ObjectId,

    pub object_ctor: ObjectId,
    pub function_ctor: ObjectId,
    pub array_ctor: ObjectId,
    pub boolean_ctor: ObjectId,
    pub string_ctor: ObjectId,
    pub error_ctor: ObjectId,
    pub type_error_ctor: ObjectId,
    pub syntax_error_ctor: ObjectId,
    pub internal_error_ctor: ObjectId,
    pub range_error_ctor: ObjectId,
}

/// Result of a property lookup along the prototype chain
enum Lookup {
    Found(Value),
    Getter(Value),
    Missing,
}

/// JavaScript execution context
pub struct Context {
    /// Object arena
    pub(crate) heap: Heap,
    pub(crate) intrinsics: Intrinsics,
    pub(crate) global: ObjectId,
    pub(crate) config: ContextConfig,
    /// Current nesting of `call`
    pub(crate) call_depth: usize,
}

fn alloc_native(
    heap: &mut Heap,
    function_prototype: ObjectId,
    name: &'static str,
    func: NativeFn,
    arity: u8,
) -> ObjectId {
    heap.alloc(JSObject::new(
        InternalClass::Function,
        Some(function_prototype),
        ObjectData::Function(CFunction::new(name, func, arity)),
    ))
}

impl Context {
    /// Create a context with the default configuration and every builtin installed
    pub fn new() -> JsResult<Self> {
        Self::with_config(ContextConfig::default())
    }

    /// Create a context with custom settings
    pub fn with_config(config: ContextConfig) -> JsResult<Self> {
        use crate::builtins::{array, boolean, error, function, object, string};

        let mut heap = Heap::with_capacity(config.initial_capacity);

        let object_prototype =
            heap.alloc(JSObject::new(InternalClass::Object, None, ObjectData::Ordinary));
        let root = Some(object_prototype);
        let function_prototype = heap.alloc(JSObject::new(
            InternalClass::Function,
            root,
            ObjectData::Function(CFunction::new("", function::js_function_prototype, 0)),
        ));
        let array_prototype = heap.alloc(JSObject::new(
            InternalClass::Array,
            root,
            ObjectData::Array(JSArray::new()),
        ));
        let boolean_prototype = heap.alloc(JSObject::new(
            InternalClass::Boolean,
            root,
            ObjectData::Primitive(Value::bool(false)),
        ));
        let number_prototype = heap.alloc(JSObject::new(
            InternalClass::Number,
            root,
            ObjectData::Primitive(Value::int(0)),
        ));
        let string_prototype = heap.alloc(JSObject::new(
            InternalClass::String,
            root,
            ObjectData::Primitive(Value::string("")),
        ));
        let error_prototype =
            heap.alloc(JSObject::new(InternalClass::Error, root, ObjectData::Ordinary));
        let type_error_prototype = heap.alloc(JSObject::new(
            InternalClass::Error,
            Some(error_prototype),
            ObjectData::Ordinary,
        ));

        let fp = function_prototype;
        let intrinsics = Intrinsics {
            object_prototype,
            function_prototype,
            array_prototype,
            boolean_prototype,
            number_prototype,
            string_prototype,
            error_prototype,
            type_error_prototype,
            object_ctor: alloc_native(&mut heap, fp, "Object", object::js_object_constructor, 1),
            function_ctor: alloc_native(&mut heap, fp, "Function", function::js_function_constructor, 1),
            array_ctor: alloc_native(&mut heap, fp, "Array", array::js_array_constructor, 1),
            boolean_ctor: alloc_native(&mut heap, fp, "Boolean", boolean::js_boolean_constructor, 1),
            string_ctor: alloc_native(&mut heap, fp, "String", string::js_string_constructor, 1),
            error_ctor: alloc_native(&mut heap, fp, "Error", error::js_error_constructor, 1),
            type_error_ctor: alloc_native(&mut heap, fp, "TypeError", error::js_type_error_constructor, 1),
            syntax_error_ctor: alloc_native(
                &mut heap,
                fp,
                "SyntaxError",
                error::js_syntax_error_constructor,
                1,
            ),
            internal_error_ctor: alloc_native(
                &mut heap,
                fp,
                "InternalError",
                error::js_internal_error_constructor,
                1,
            ),
            range_error_ctor: alloc_native(
                &mut heap,
                fp,
                "RangeError",
                error::js_range_error_constructor,
                1,
            ),
        };
        let global = heap.alloc(JSObject::new(InternalClass::Object, root, ObjectData::Ordinary));

        let mut ctx = Context {
            heap,
            intrinsics,
            global,
            config,
            call_depth: 0,
        };

        let i = intrinsics;
        let links = [
            (i.object_ctor, object_prototype),
            (i.function_ctor, function_prototype),
            (i.array_ctor, array_prototype),
            (i.boolean_ctor, boolean_prototype),
            (i.string_ctor, string_prototype),
            (i.error_ctor, error_prototype),
            (i.type_error_ctor, type_error_prototype),
        ];
        for (ctor, proto) in links {
            ctx.link_constructor(ctor, proto)?;
        }

        builtins::init(&mut ctx)?;
        debug!(objects = ctx.heap.len(), "context initialized");
        Ok(ctx)
    }

    /// Wire `ctor.prototype` and `proto.constructor`
    pub(crate) fn link_constructor(&mut self, ctor: ObjectId, proto: ObjectId) -> JsResult<()> {
        self.define_own_property(
            ctor,
            JSString::new("prototype"),
            PropFlags::WRITABLE,
            PropertyValue::Data(Value::object(proto)),
        )?;
        self.define_own_property(
            proto,
            JSString::new("constructor"),
            PropFlags::WRITABLE | PropFlags::CONFIGURABLE,
            PropertyValue::Data(Value::object(ctor)),
        )
    }

    /// Well-known objects
    #[inline]
    pub fn intrinsics(&self) -> &Intrinsics {
        &self.intrinsics
    }

    /// The global object
    #[inline]
    pub fn global_object(&self) -> ObjectId {
        self.global
    }

    /// Active configuration
    #[inline]
    pub fn config(&self) -> &ContextConfig {
        &self.config
    }

    /// Get memory usage statistics
    pub fn memory_stats(&self) -> MemoryStats {
        self.heap.stats()
    }

    // Raw object access

    pub(crate) fn object(&self, id: ObjectId) -> JsResult<&JSObject> {
        self.heap
            .get(id)
            .ok_or_else(|| JsError::internal(format!("invalid object reference #{}", id.index())))
    }

    pub(crate) fn object_mut(&mut self, id: ObjectId) -> JsResult<&mut JSObject> {
        self.heap
            .get_mut(id)
            .ok_or_else(|| JsError::internal(format!("invalid object reference #{}", id.index())))
    }

    /// Allocate an object of any class
    pub fn alloc_object(
        &mut self,
        class: InternalClass,
        proto: Option<ObjectId>,
        data: ObjectData,
    ) -> ObjectId {
        self.heap.alloc(JSObject::new(class, proto, data))
    }

    // Value construction

    /// Create a plain object with the given parent
    pub fn new_object(&mut self, proto: Option<ObjectId>) -> ObjectId {
        self.alloc_object(InternalClass::Object, proto, ObjectData::Ordinary)
    }

    /// Create a plain object inheriting from Object.prototype
    pub fn new_plain_object(&mut self) -> ObjectId {
        self.new_object(Some(self.intrinsics.object_prototype))
    }

    /// Create an array of `len` holes
    pub fn new_array(&mut self, len: u32) -> ObjectId {
        let proto = Some(self.intrinsics.array_prototype);
        self.alloc_object(InternalClass::Array, proto, ObjectData::Array(JSArray::with_length(len)))
    }

    /// Create a dense array holding `values`
    pub fn new_array_from(&mut self, values: Vec<Value>) -> ObjectId {
        let proto = Some(self.intrinsics.array_prototype);
        self.alloc_object(
            InternalClass::Array,
            proto,
            ObjectData::Array(JSArray::from_values(values)),
        )
    }

    /// Create an arguments object for `args`
    pub fn new_arguments(&mut self, args: &[Value]) -> ObjectId {
        let proto = Some(self.intrinsics.object_prototype);
        self.alloc_object(
            InternalClass::Arguments,
            proto,
            ObjectData::Array(JSArray::from_values(args.to_vec())),
        )
    }

    /// Create a native function object
    pub fn new_function(&mut self, name: &'static str, func: NativeFn, arity: u8) -> Value {
        let proto = self.intrinsics.function_prototype;
        Value::object(alloc_native(&mut self.heap, proto, name, func, arity))
    }

    /// Constructor function of an error kind
    pub fn error_constructor(&self, kind: ErrorKind) -> ObjectId {
        let i = &self.intrinsics;
        match kind {
            ErrorKind::Error => i.error_ctor,
            ErrorKind::TypeError => i.type_error_ctor,
            ErrorKind::RangeError => i.range_error_ctor,
            ErrorKind::SyntaxError => i.syntax_error_ctor,
            ErrorKind::InternalError => i.internal_error_ctor,
        }
    }

    /// Create an error object
    ///
    /// The parent is whatever the constructor's `prototype` currently is.
    pub fn new_error(&mut self, kind: ErrorKind, message: Option<&str>) -> JsResult<ObjectId> {
        let ctor = self.error_constructor(kind);
        let proto = match self.get(ctor, "prototype")? {
            Value::Object(p) => p,
            _ => self.intrinsics.error_prototype,
        };
        let id = self.alloc_object(InternalClass::Error, Some(proto), ObjectData::Ordinary);
        if let Some(msg) = message {
            self.define_own_property(
                id,
                JSString::new("message"),
                PropFlags::WRITABLE | PropFlags::CONFIGURABLE,
                PropertyValue::Data(Value::string(msg)),
            )?;
        }
        Ok(id)
    }

    /// Materialize a Rust-side error as the JS value it stands for
    pub fn error_to_value(&mut self, err: &JsError) -> JsResult<Value> {
        match (err, err.kind()) {
            (JsError::Exception(value), _) => Ok(value.clone()),
            (_, Some(kind)) => Ok(Value::object(self.new_error(kind, err.message())?)),
            (_, None) => Ok(Value::undefined()),
        }
    }

    // Introspection

    /// Internal class of any value
    ///
    /// A handle that no longer names an object reports `Memory`.
    pub fn internal_class(&self, value: &Value) -> InternalClass {
        match value {
            Value::Undefined => InternalClass::Undefined,
            Value::Null => InternalClass::Null,
            Value::Bool(_) => InternalClass::Boolean,
            Value::Number(_) => InternalClass::Number,
            Value::String(_) => InternalClass::StringPrim,
            Value::Object(id) => self
                .heap
                .get(*id)
                .map_or(InternalClass::Memory, |obj| obj.class),
        }
    }

    /// Check if a value is a function object
    pub fn is_callable(&self, value: &Value) -> bool {
        value
            .as_object()
            .and_then(|id| self.heap.get(id))
            .is_some_and(|obj| obj.function().is_some())
    }

    /// Parent (prototype) of an object
    pub fn get_parent(&self, id: ObjectId) -> JsResult<Option<ObjectId>> {
        Ok(self.object(id)?.proto)
    }

    /// Replace the parent of an object
    pub fn set_parent(&mut self, id: ObjectId, proto: Option<ObjectId>) -> JsResult<()> {
        self.object_mut(id)?.proto = proto;
        Ok(())
    }

    /// Install an own property, replacing any existing one of the same key
    ///
    /// On Array and Arguments objects an array-index key holding data
    /// goes to element storage and `length` resizes the storage.
    pub fn define_own_property(
        &mut self,
        id: ObjectId,
        key: JSString,
        flags: PropFlags,
        value: PropertyValue,
    ) -> JsResult<()> {
        if self.object(id)?.is_array_base() {
            let index = is_array_index(key.as_str());
            match (&value, index) {
                (PropertyValue::Data(v), Some(index)) => {
                    let obj = self.object_mut(id)?;
                    obj.props.delete(key.as_str());
                    if let Some(arr) = obj.array_mut() {
                        arr.set(index, v.clone());
                    }
                    return Ok(());
                }
                (PropertyValue::Data(v), None) if key.as_str() == "length" => {
                    let len = self.array_length_from(v)?;
                    return self.set_array_length(id, len);
                }
                (PropertyValue::Accessor(_), Some(index)) => {
                    if let Some(arr) = self.object_mut(id)?.array_mut() {
                        arr.delete(index);
                    }
                }
                _ => {}
            }
        }

        self.object_mut(id)?.props.insert(key, value, flags);
        Ok(())
    }

    /// Own property as stored, with its attributes
    pub fn get_own_property(
        &self,
        id: ObjectId,
        key: &str,
    ) -> JsResult<Option<(PropertyValue, PropFlags)>> {
        let obj = self.object(id)?;
        if let Some(arr) = obj.array() {
            if let Some(v) = is_array_index(key).and_then(|i| arr.get(i)) {
                return Ok(Some((PropertyValue::Data(v.clone()), PropFlags::DEFAULT)));
            }
            if key == "length" {
                let len = Value::number(arr.len() as f64);
                return Ok(Some((PropertyValue::Data(len), PropFlags::WRITABLE)));
            }
        }
        Ok(obj.props.get(key).map(|p| (p.value.clone(), p.flags)))
    }

    /// Check for an own property
    pub fn has_own_property(&self, id: ObjectId, key: &str) -> JsResult<bool> {
        let obj = self.object(id)?;
        if let Some(arr) = obj.array() {
            if key == "length" || is_array_index(key).is_some_and(|i| arr.has(i)) {
                return Ok(true);
            }
        }
        if key == "length" && string_wrapper_length(obj).is_some() {
            return Ok(true);
        }
        Ok(obj.props.has(key))
    }

    // Generic property operations

    fn lookup(&self, start: ObjectId, key: &str) -> JsResult<Lookup> {
        let index = is_array_index(key);
        let mut current = Some(start);
        let mut hops = 0;

        while let Some(id) = current {
            let obj = self.object(id)?;
            if let Some(arr) = obj.array() {
                if let Some(v) = index.and_then(|i| arr.get(i)) {
                    return Ok(Lookup::Found(v.clone()));
                }
                if key == "length" {
                    return Ok(Lookup::Found(Value::number(arr.len() as f64)));
                }
            }
            if key == "length" {
                if let Some(len) = string_wrapper_length(obj) {
                    return Ok(Lookup::Found(Value::number(len as f64)));
                }
            }
            if let Some(prop) = obj.props.get(key) {
                return Ok(match &prop.value {
                    PropertyValue::Data(v) => Lookup::Found(v.clone()),
                    PropertyValue::Accessor(acc) => match acc.getter() {
                        Some(getter) => Lookup::Getter(getter.clone()),
                        None => Lookup::Found(Value::undefined()),
                    },
                });
            }

            hops += 1;
            if hops > self.heap.len() {
                return Err(JsError::internal("cycle in prototype chain"));
            }
            current = obj.proto;
        }

        Ok(Lookup::Missing)
    }

    fn get_with_receiver(&mut self, start: ObjectId, key: &str, receiver: Value) -> JsResult<Value> {
        match self.lookup(start, key)? {
            Lookup::Found(v) => Ok(v),
            Lookup::Getter(getter) => self.call(&getter, receiver, &[]),
            Lookup::Missing => Ok(Value::undefined()),
        }
    }

    /// Read `obj[key]` through the prototype chain, running getters
    pub fn get(&mut self, id: ObjectId, key: &str) -> JsResult<Value> {
        self.get_with_receiver(id, key, Value::object(id))
    }

    /// Read `value[key]` for any value; primitives read through their prototype
    pub fn get_value(&mut self, target: &Value, key: &str) -> JsResult<Value> {
        let start = match target {
            Value::Object(id) => *id,
            Value::Undefined | Value::Null => {
                return Err(JsError::type_error(format!(
                    "cannot read property '{key}' of {target}"
                )));
            }
            Value::Bool(_) => self.intrinsics.boolean_prototype,
            Value::Number(_) => self.intrinsics.number_prototype,
            Value::String(s) => {
                if key == "length" {
                    return Ok(Value::number(s.utf16_len() as f64));
                }
                self.intrinsics.string_prototype
            }
        };
        self.get_with_receiver(start, key, target.clone())
    }

    /// First property named `key` along the chain (element storage excluded)
    fn find_property(
        &self,
        start: ObjectId,
        key: &str,
    ) -> JsResult<Option<(ObjectId, PropertyValue, PropFlags)>> {
        let mut current = Some(start);
        let mut hops = 0;
        while let Some(id) = current {
            let obj = self.object(id)?;
            if let Some(prop) = obj.props.get(key) {
                return Ok(Some((id, prop.value.clone(), prop.flags)));
            }
            hops += 1;
            if hops > self.heap.len() {
                return Err(JsError::internal("cycle in prototype chain"));
            }
            current = obj.proto;
        }
        Ok(None)
    }

    /// Assign `obj[key] = value`
    ///
    /// Setters found along the chain are called; writes to non-writable
    /// properties and to accessors without a setter are silently ignored.
    /// Anything else creates or updates an own enumerable property.
    pub fn put(&mut self, id: ObjectId, key: &str, value: Value) -> JsResult<()> {
        if self.object(id)?.is_array_base() {
            if let Some(index) = is_array_index(key) {
                if let Some(arr) = self.object_mut(id)?.array_mut() {
                    arr.set(index, value);
                }
                return Ok(());
            }
            if key == "length" {
                let len = self.array_length_from(&value)?;
                return self.set_array_length(id, len);
            }
        }

        match self.find_property(id, key)? {
            Some((_, PropertyValue::Data(_), flags)) if !flags.is_writable() => {
                trace!(key, "write to read-only property ignored");
                return Ok(());
            }
            Some((owner, PropertyValue::Data(_), _)) if owner == id => {
                if let Some(prop) = self.object_mut(id)?.props.get_mut(key) {
                    prop.value = PropertyValue::Data(value);
                }
                return Ok(());
            }
            Some((_, PropertyValue::Accessor(acc), _)) => {
                if let Some(setter) = acc.setter() {
                    self.call(setter, Value::object(id), &[value])?;
                }
                return Ok(());
            }
            _ => {}
        }

        self.object_mut(id)?
            .props
            .insert(JSString::new(key), PropertyValue::Data(value), PropFlags::DEFAULT);
        Ok(())
    }

    /// `key in obj`
    pub fn has_property(&self, id: ObjectId, key: &str) -> JsResult<bool> {
        let mut current = Some(id);
        let mut hops = 0;
        while let Some(cid) = current {
            if self.has_own_property(cid, key)? {
                return Ok(true);
            }
            hops += 1;
            if hops > self.heap.len() {
                return Err(JsError::internal("cycle in prototype chain"));
            }
            current = self.object(cid)?.proto;
        }
        Ok(false)
    }

    /// `delete obj[key]`; false when the property is not configurable
    pub fn delete_property(&mut self, id: ObjectId, key: &str) -> JsResult<bool> {
        let obj = self.object_mut(id)?;
        if let Some(arr) = obj.array_mut() {
            if let Some(index) = is_array_index(key) {
                if arr.delete(index) {
                    return Ok(true);
                }
            } else if key == "length" {
                return Ok(false);
            }
        }

        let configurable = obj.props.get(key).map(|p| p.flags.is_configurable());
        match configurable {
            None => Ok(true),
            Some(false) => Ok(false),
            Some(true) => {
                obj.props.delete(key);
                Ok(true)
            }
        }
    }

    /// Enumerable keys in `for..in` order: own keys first (indices, then
    /// insertion order), then each parent's, skipping shadowed names
    pub fn enumerable_keys(&self, id: ObjectId) -> JsResult<Vec<JSString>> {
        let mut seen: HashSet<JSString> = HashSet::new();
        let mut keys = Vec::new();
        let mut current = Some(id);
        let mut hops = 0;

        while let Some(cid) = current {
            let obj = self.object(cid)?;
            if let Some(arr) = obj.array() {
                for index in arr.indices() {
                    let key = JSString::from(u32_to_string(index));
                    if seen.insert(key.clone()) {
                        keys.push(key);
                    }
                }
                seen.insert(JSString::new("length"));
            }
            for prop in obj.props.iter() {
                if seen.insert(prop.key.clone()) && prop.flags.is_enumerable() {
                    keys.push(prop.key.clone());
                }
            }

            hops += 1;
            if hops > self.heap.len() {
                return Err(JsError::internal("cycle in prototype chain"));
            }
            current = obj.proto;
        }

        Ok(keys)
    }

    // Array storage

    /// Length of an Array or Arguments object
    pub fn array_length(&self, id: ObjectId) -> JsResult<u32> {
        self.object(id)?
            .array()
            .map(JSArray::len)
            .ok_or_else(|| JsError::type_error("not an array"))
    }

    /// Set the length of an Array or Arguments object
    pub fn set_array_length(&mut self, id: ObjectId, len: u32) -> JsResult<()> {
        self.object_mut(id)?
            .array_mut()
            .ok_or_else(|| JsError::type_error("not an array"))?
            .set_length(len);
        Ok(())
    }

    /// Raw block copy of `src[from..to]` into `dest` at `dest_index`
    ///
    /// Holes in the source range stay holes in the destination.
    pub fn array_copy(
        &mut self,
        dest: ObjectId,
        dest_index: u32,
        src: ObjectId,
        from: u32,
        to: u32,
    ) -> JsResult<()> {
        if from >= to {
            return Ok(());
        }
        let slots = self
            .object(src)?
            .array()
            .ok_or_else(|| JsError::type_error("not an array"))?
            .slots(from, to);
        self.object_mut(dest)?
            .array_mut()
            .ok_or_else(|| JsError::type_error("not an array"))?
            .write_slots(dest_index, to - from, slots);
        Ok(())
    }

    /// Validate a value assigned to an array `length`
    pub fn array_length_from(&mut self, value: &Value) -> JsResult<u32> {
        let n = self.to_number(value)?;
        let len = f64_to_uint32(n);
        if len as f64 != n {
            return Err(JsError::range_error("invalid array length"));
        }
        Ok(len)
    }
}

fn string_wrapper_length(obj: &JSObject) -> Option<u32> {
    match (obj.class, obj.primitive()) {
        (InternalClass::String, Some(Value::String(s))) => Some(s.utf16_len()),
        _ => None,
    }
}
