// Copyright 2025 the Aster authors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Flags describing the state of a tracked button, gesture, or pose.

/// Bitflags for a button-like input: whether it is currently active, and
/// whether it changed this frame.
///
/// Multiple flags can be combined using bitwise operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ButtonState {
    bits: u32,
}

impl ButtonState {
    /// Not active, no change this frame.
    pub const INACTIVE: Self = Self { bits: 0 };
    /// Currently active (held/tracked/pinching).
    pub const ACTIVE: Self = Self { bits: 1 << 0 };
    /// Became active this frame.
    pub const JUST_ACTIVE: Self = Self {
        bits: Self::ACTIVE.bits | 1 << 1,
    };
    /// Became inactive this frame.
    pub const JUST_INACTIVE: Self = Self { bits: 1 << 2 };

    /// Creates flags from raw bits.
    pub const fn from_bits(bits: u32) -> Self {
        Self { bits }
    }

    /// Returns the raw bits.
    pub const fn bits(&self) -> u32 {
        self.bits
    }

    /// Returns whether the active flag is set.
    pub const fn is_active(&self) -> bool {
        self.bits & Self::ACTIVE.bits != 0
    }

    /// Combines two sets of flags.
    pub const fn union(self, other: Self) -> Self {
        Self {
            bits: self.bits | other.bits,
        }
    }
}

impl std::ops::BitOr for ButtonState {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        self.union(rhs)
    }
}

impl std::ops::BitOrAssign for ButtonState {
    fn bitor_assign(&mut self, rhs: Self) {
        *self = self.union(rhs);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_active_flag() {
        assert!(ButtonState::ACTIVE.is_active());
        assert!(ButtonState::JUST_ACTIVE.is_active());
        assert!(!ButtonState::INACTIVE.is_active());
        assert!(!ButtonState::JUST_INACTIVE.is_active());
    }

    #[test]
    fn test_union() {
        let combined = ButtonState::ACTIVE | ButtonState::JUST_INACTIVE;
        assert!(combined.is_active());
        assert_eq!(
            combined.bits(),
            ButtonState::ACTIVE.bits() | ButtonState::JUST_INACTIVE.bits()
        );
    }
}
