//! JavaScript object representation
//!
//! This module implements the JSObject struct and the types hanging off
//! it: the internal class tag, property attribute flags and the property
//! record stored in an object's table.

use crate::runtime::array::JSArray;
use crate::runtime::function::CFunction;
use crate::runtime::property::PropertyTable;
use crate::runtime::string::JSString;
use crate::value::{ObjectId, Value};
use std::ops::{BitOr, BitOrAssign};
use std::rc::Rc;

/// Internal class tags
///
/// Every value has one; objects get theirs at creation and keep it for
/// life. The numeric values are fixed and shared with the runtime core.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InternalClass {
    /// Uninitialized memory
    Memory = 0,
    /// String primitive
    StringPrim = 1,
    Undefined = 2,
    Null = 3,
    /// Plain object
    Object = 4,
    /// Arguments object (array-base)
    Arguments = 5,
    /// Array (array-base)
    Array = 6,
    Function = 7,
    Boolean = 8,
    Number = 9,
    /// String wrapper object
    String = 10,
    Error = 11,
    RegExp = 12,
    Date = 13,
    Json = 14,
    Math = 15,
}

impl InternalClass {
    /// Number of tags
    pub const COUNT: usize = 16;

    /// Decode a raw tag
    pub fn from_u8(tag: u8) -> Option<Self> {
        use InternalClass::*;
        const ALL: [InternalClass; InternalClass::COUNT] = [
            Memory, StringPrim, Undefined, Null, Object, Arguments, Array, Function, Boolean,
            Number, String, Error, RegExp, Date, Json, Math,
        ];
        ALL.get(tag as usize).copied()
    }

    /// Array or Arguments: objects backed by indexed element storage
    #[inline]
    pub fn is_array_base(self) -> bool {
        matches!(self, InternalClass::Array | InternalClass::Arguments)
    }
}

/// Property attribute bitmask
#[derive(Clone, Copy, PartialEq, Eq, Default)]
pub struct PropFlags(u8);

impl PropFlags {
    pub const NONE: PropFlags = PropFlags(0);
    pub const CONFIGURABLE: PropFlags = PropFlags(1);
    pub const ENUMERABLE: PropFlags = PropFlags(2);
    pub const WRITABLE: PropFlags = PropFlags(4);
    /// The property holds a getter/setter pair
    pub const GET_SET: PropFlags = PropFlags(8);

    /// Writable, enumerable and configurable: the attributes of a plain assignment
    pub const DEFAULT: PropFlags = PropFlags(1 | 2 | 4);

    /// Raw bits
    #[inline]
    pub const fn bits(self) -> u8 {
        self.0
    }

    #[inline]
    pub const fn contains(self, other: PropFlags) -> bool {
        self.0 & other.0 == other.0
    }

    #[inline]
    pub const fn without(self, other: PropFlags) -> PropFlags {
        PropFlags(self.0 & !other.0)
    }

    #[inline]
    pub const fn is_configurable(self) -> bool {
        self.contains(Self::CONFIGURABLE)
    }

    #[inline]
    pub const fn is_enumerable(self) -> bool {
        self.contains(Self::ENUMERABLE)
    }

    #[inline]
    pub const fn is_writable(self) -> bool {
        self.contains(Self::WRITABLE)
    }
}

impl BitOr for PropFlags {
    type Output = PropFlags;

    fn bitor(self, rhs: PropFlags) -> PropFlags {
        PropFlags(self.0 | rhs.0)
    }
}

impl BitOrAssign for PropFlags {
    fn bitor_assign(&mut self, rhs: PropFlags) {
        self.0 |= rhs.0;
    }
}

impl std::fmt::Debug for PropFlags {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names = [
            (Self::CONFIGURABLE, 'c'),
            (Self::ENUMERABLE, 'e'),
            (Self::WRITABLE, 'w'),
            (Self::GET_SET, 'a'),
        ];
        let s: String = names
            .iter()
            .map(|&(flag, c)| if self.contains(flag) { c } else { '-' })
            .collect();
        write!(f, "PropFlags({s})")
    }
}

/// Getter/setter pair of an accessor property
///
/// The `has_*` flags record whether each half was callable when the
/// accessor was built; a half that was not is treated as absent.
#[derive(Debug, Clone)]
pub struct PropertyAccessor {
    getter: Value,
    setter: Value,
    has_getter: bool,
    has_setter: bool,
}

impl PropertyAccessor {
    pub fn new(getter: Value, has_getter: bool, setter: Value, has_setter: bool) -> Self {
        PropertyAccessor {
            getter,
            setter,
            has_getter,
            has_setter,
        }
    }

    /// The getter, if one was installed
    #[inline]
    pub fn getter(&self) -> Option<&Value> {
        self.has_getter.then_some(&self.getter)
    }

    /// The setter, if one was installed
    #[inline]
    pub fn setter(&self) -> Option<&Value> {
        self.has_setter.then_some(&self.setter)
    }
}

/// What a property holds
#[derive(Debug, Clone)]
pub enum PropertyValue {
    Data(Value),
    Accessor(Rc<PropertyAccessor>),
}

impl PropertyValue {
    #[inline]
    pub fn is_accessor(&self) -> bool {
        matches!(self, PropertyValue::Accessor(_))
    }
}

/// A property in an object's property table
#[derive(Debug, Clone)]
pub struct Property {
    pub key: JSString,
    pub value: PropertyValue,
    pub flags: PropFlags,
    /// Hash chain link: index + 1 of the next entry in the bucket, 0 = end
    pub(crate) hash_next: u32,
}

impl Property {
    /// Create a property; the GET_SET bit always follows the value kind
    pub fn new(key: JSString, value: PropertyValue, flags: PropFlags) -> Self {
        let flags = if value.is_accessor() {
            flags | PropFlags::GET_SET
        } else {
            flags.without(PropFlags::GET_SET)
        };
        Property {
            key,
            value,
            flags,
            hash_next: 0,
        }
    }
}

/// Class-specific payload of an object
#[derive(Debug)]
pub enum ObjectData {
    Ordinary,
    /// Element storage of an Array or Arguments object
    Array(JSArray),
    Function(CFunction),
    /// Wrapped primitive of a Boolean/Number/String object
    Primitive(Value),
}

/// JavaScript object
#[derive(Debug)]
pub struct JSObject {
    pub class: InternalClass,
    /// Prototype (parent) reference
    pub proto: Option<ObjectId>,
    pub props: PropertyTable,
    pub data: ObjectData,
}

impl JSObject {
    pub fn new(class: InternalClass, proto: Option<ObjectId>, data: ObjectData) -> Self {
        JSObject {
            class,
            proto,
            props: PropertyTable::new(),
            data,
        }
    }

    /// Check if this is an Array or Arguments object
    #[inline]
    pub fn is_array_base(&self) -> bool {
        self.class.is_array_base()
    }

    /// Element storage, for array-base objects
    #[inline]
    pub fn array(&self) -> Option<&JSArray> {
        match &self.data {
            ObjectData::Array(arr) => Some(arr),
            _ => None,
        }
    }

    #[inline]
    pub fn array_mut(&mut self) -> Option<&mut JSArray> {
        match &mut self.data {
            ObjectData::Array(arr) => Some(arr),
            _ => None,
        }
    }

    /// Native function record, for function objects
    #[inline]
    pub fn function(&self) -> Option<&CFunction> {
        match &self.data {
            ObjectData::Function(f) => Some(f),
            _ => None,
        }
    }

    /// Wrapped primitive, for wrapper objects
    #[inline]
    pub fn primitive(&self) -> Option<&Value> {
        match &self.data {
            ObjectData::Primitive(v) => Some(v),
            _ => None,
        }
    }
}
