//! macOS accessibility backend (AXUIElement)

use std::collections::VecDeque;
use std::os::raw::c_void;
use std::ptr;

use core_foundation::array::{CFArray, CFArrayGetTypeID, CFArrayRef};
use core_foundation::base::{
    CFGetTypeID, CFIndex, CFRange, CFRelease, CFRetain, CFType, CFTypeID, CFTypeRef, TCFType,
};
use core_foundation::boolean::CFBoolean;
use core_foundation::string::{CFString, CFStringRef};

use crate::application::ports::{AccessibilityBackend, AttributeWriteError, FocusedElement};
use crate::domain::capture::TextRange;
use crate::domain::config::TraversalLimits;

type AXUIElementRef = *const c_void;
type AXError = i32;

const AX_ERROR_SUCCESS: AXError = 0;
const AX_VALUE_TYPE_CFRANGE: u32 = 4;

const AX_FOCUSED_APPLICATION: &str = "AXFocusedApplication";
const AX_FOCUSED_UI_ELEMENT: &str = "AXFocusedUIElement";
const AX_FOCUSED_WINDOW: &str = "AXFocusedWindow";
const AX_FOCUSED: &str = "AXFocused";
const AX_CHILDREN: &str = "AXChildren";
const AX_TITLE: &str = "AXTitle";
const AX_VALUE: &str = "AXValue";
const AX_SELECTED_TEXT: &str = "AXSelectedText";
const AX_SELECTED_TEXT_RANGE: &str = "AXSelectedTextRange";

#[link(name = "ApplicationServices", kind = "framework")]
extern "C" {
    fn AXIsProcessTrusted() -> bool;
    fn AXUIElementGetTypeID() -> CFTypeID;
    fn AXUIElementCreateSystemWide() -> AXUIElementRef;
    fn AXUIElementCopyAttributeValue(
        element: AXUIElementRef,
        attribute: CFStringRef,
        value: *mut CFTypeRef,
    ) -> AXError;
    fn AXUIElementSetAttributeValue(
        element: AXUIElementRef,
        attribute: CFStringRef,
        value: CFTypeRef,
    ) -> AXError;
    fn AXValueGetValue(value: CFTypeRef, the_type: u32, value_ptr: *mut c_void) -> u8;
}

/// Owned AXUIElement reference, released on drop
struct AxElement {
    raw: AXUIElementRef,
}

impl AxElement {
    fn system_wide() -> Option<Self> {
        // SAFETY: returns a new reference we own
        let raw = unsafe { AXUIElementCreateSystemWide() };
        (!raw.is_null()).then_some(Self { raw })
    }

    /// Take ownership of a +1 reference, checking that it is an element
    fn from_owned(raw: CFTypeRef) -> Option<Self> {
        if raw.is_null() {
            return None;
        }
        // SAFETY: raw is a live CF object we own
        unsafe {
            if CFGetTypeID(raw) != AXUIElementGetTypeID() {
                CFRelease(raw);
                return None;
            }
        }
        Some(Self { raw })
    }

    fn copy_raw(&self, attribute: &str) -> Option<CFTypeRef> {
        let name = CFString::new(attribute);
        let mut value: CFTypeRef = ptr::null();

        // SAFETY: value is written only on success and is then owned by us
        let err = unsafe {
            AXUIElementCopyAttributeValue(self.raw, name.as_concrete_TypeRef(), &mut value)
        };

        (err == AX_ERROR_SUCCESS && !value.is_null()).then_some(value)
    }

    fn copy_attribute(&self, attribute: &str) -> Option<CFType> {
        let raw = self.copy_raw(attribute)?;
        // SAFETY: copy_raw hands back a +1 reference
        Some(unsafe { CFType::wrap_under_create_rule(raw) })
    }

    fn string(&self, attribute: &str) -> Option<String> {
        self.copy_attribute(attribute)?
            .downcast::<CFString>()
            .map(|s| s.to_string())
    }

    fn boolean(&self, attribute: &str) -> Option<bool> {
        self.copy_attribute(attribute)?
            .downcast::<CFBoolean>()
            .map(bool::from)
    }

    fn element(&self, attribute: &str) -> Option<AxElement> {
        Self::from_owned(self.copy_raw(attribute)?)
    }

    fn children(&self) -> Vec<AxElement> {
        let Some(raw) = self.copy_raw(AX_CHILDREN) else {
            return Vec::new();
        };

        // SAFETY: raw is owned; it is either wrapped or released below
        unsafe {
            if CFGetTypeID(raw) != CFArrayGetTypeID() {
                CFRelease(raw);
                return Vec::new();
            }

            let array: CFArray<CFType> = CFArray::wrap_under_create_rule(raw as CFArrayRef);
            array
                .iter()
                .filter_map(|child| {
                    let child = child.as_CFTypeRef();
                    CFRetain(child);
                    Self::from_owned(child)
                })
                .collect()
        }
    }

    fn range(&self, attribute: &str) -> Option<TextRange> {
        let value = self.copy_attribute(attribute)?;
        let mut range = CFRange {
            location: 0,
            length: 0,
        };

        // SAFETY: range matches the layout of kAXValueCFRangeType
        let ok = unsafe {
            AXValueGetValue(
                value.as_CFTypeRef(),
                AX_VALUE_TYPE_CFRANGE,
                &mut range as *mut CFRange as *mut c_void,
            )
        };

        if ok == 0 {
            return None;
        }
        Some(TextRange::new(to_units(range.location)?, to_units(range.length)?))
    }

    fn set_string(&self, attribute: &'static str, text: &str) -> Result<(), AttributeWriteError> {
        let name = CFString::new(attribute);
        let value = CFString::new(text);

        // SAFETY: both CF objects outlive the call
        let err = unsafe {
            AXUIElementSetAttributeValue(
                self.raw,
                name.as_concrete_TypeRef(),
                value.as_CFTypeRef(),
            )
        };

        if err == AX_ERROR_SUCCESS {
            Ok(())
        } else {
            Err(AttributeWriteError {
                attribute,
                reason: format!("AXError {}", err),
            })
        }
    }
}

impl Drop for AxElement {
    fn drop(&mut self) {
        // SAFETY: we own exactly one reference
        unsafe { CFRelease(self.raw) }
    }
}

fn to_units(index: CFIndex) -> Option<usize> {
    usize::try_from(index).ok()
}

/// Focused element of the frontmost application
pub struct MacFocusedElement {
    element: AxElement,
    app_name: String,
}

impl FocusedElement for MacFocusedElement {
    fn app_name(&self) -> String {
        self.app_name.clone()
    }

    fn selected_text(&self) -> Option<String> {
        self.element.string(AX_SELECTED_TEXT)
    }

    fn value(&self) -> Option<String> {
        self.element.string(AX_VALUE)
    }

    fn selected_range(&self) -> Option<TextRange> {
        self.element.range(AX_SELECTED_TEXT_RANGE)
    }

    fn set_selected_text(&self, text: &str) -> Result<(), AttributeWriteError> {
        self.element.set_string(AX_SELECTED_TEXT, text)
    }

    fn set_value(&self, text: &str) -> Result<(), AttributeWriteError> {
        self.element.set_string(AX_VALUE, text)
    }
}

/// Accessibility backend for macOS
#[derive(Debug, Clone, Default)]
pub struct MacAccessibility {
    limits: TraversalLimits,
}

impl MacAccessibility {
    pub fn new(limits: TraversalLimits) -> Self {
        Self { limits }
    }

    /// Search the focused window for a descendant reporting `AXFocused`
    fn search_focused(&self, window: AxElement) -> Option<AxElement> {
        let mut queue = VecDeque::from([(window, 0usize)]);
        let mut visited = 0;

        while let Some((element, depth)) = queue.pop_front() {
            if visited >= self.limits.max_items {
                break;
            }
            visited += 1;

            if element.boolean(AX_FOCUSED) == Some(true) {
                return Some(element);
            }
            if depth < self.limits.max_depth {
                queue.extend(element.children().into_iter().map(|c| (c, depth + 1)));
            }
        }

        tracing::debug!(visited, "no focused descendant found");
        None
    }
}

impl AccessibilityBackend for MacAccessibility {
    type Element = MacFocusedElement;

    fn is_trusted(&self) -> bool {
        // SAFETY: no arguments, no ownership transfer
        unsafe { AXIsProcessTrusted() }
    }

    fn focused_element(&self) -> Option<MacFocusedElement> {
        let app = AxElement::system_wide()?.element(AX_FOCUSED_APPLICATION)?;
        let app_name = app.string(AX_TITLE).unwrap_or_default();

        let element = match app.element(AX_FOCUSED_UI_ELEMENT) {
            Some(element) => element,
            None => self.search_focused(app.element(AX_FOCUSED_WINDOW)?)?,
        };

        Some(MacFocusedElement { element, app_name })
    }
}
