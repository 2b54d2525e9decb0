// Copyright (c) Ada Kestrel. All rights reserved.
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use std::rc::Rc;

/// The dynamically-typed payload a transform produces.
///
/// The grammar determines the shape: a `literal` produces [`Value::Text`], a
/// `charFrom`/`anyChar` produces [`Value::Char`], `sequenceOf` and the
/// repetition combinators produce [`Value::List`], and anything without a
/// meaningful result (`endOfInput`, a caught `optional`) produces
/// [`Value::Null`].
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Null,
    Char(char),
    Text(Rc<str>),
    List(Vec<Value>),
}

impl Value {
    pub fn text(s: impl Into<Rc<str>>) -> Self {
        Value::Text(s.into())
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_char(&self) -> Option<char> {
        match self {
            Value::Char(c) => Some(*c),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }
}
