//! Utility functions and types used across the library
use std::fmt;

/// Restrict value to a certain interval
#[inline]
pub fn clamp<T>(val: T, min: T, max: T) -> T
where
    T: PartialOrd,
{
    if val < min {
        min
    } else if val > max {
        max
    } else {
        val
    }
}

/// Abstraction over slices used by `ArrayIter`
pub trait Array {
    type Item;
    fn new() -> Self;
    fn at(&self, index: usize) -> Option<&Self::Item>;
    fn take(&mut self, index: usize) -> Option<Self::Item>;
    fn put(&mut self, index: usize, value: Self::Item) -> Option<Self::Item>;
}

macro_rules! impl_array(
    ($($size:expr),+) => {
        $(
            impl<T: Copy> Array for [Option<T>; $size] {
                type Item = T;
                fn new() -> Self {
                    [None; $size]
                }
                fn at(&self, index: usize) -> Option<&Self::Item> {
                    self.get(index).and_then(|item| item.as_ref())
                }
                fn take(&mut self, index: usize) -> Option<Self::Item> {
                    self[index].take()
                }
                fn put(&mut self, index: usize, value: Self::Item) -> Option<Self::Item> {
                    self[index].replace(value)
                }
            }
        )+
    }
);

impl_array!(8);

/// Fixed sized iterator
///
/// Used to hold symmetric reflections of a single point. This type is similar to a
/// smallvec but it never allocates and just panics
/// if you try to fit more data than its size.
#[derive(Clone, Copy)]
pub struct ArrayIter<A> {
    start: usize,
    end: usize,
    array: A,
}

impl<A> fmt::Debug for ArrayIter<A>
where
    A: Array,
    A::Item: fmt::Debug,
{
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut list = fmt.debug_list();
        for item in (self.start..self.end).filter_map(|index| self.array.at(index)) {
            list.entry(item);
        }
        list.finish()
    }
}

impl<A: Array> Default for ArrayIter<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: Array> ArrayIter<A> {
    pub fn new() -> Self {
        Self {
            start: 0,
            end: 0,
            array: A::new(),
        }
    }

    /// Push new element to the end of the iterator
    pub fn push(&mut self, item: A::Item) {
        self.array.put(self.end, item);
        self.end += 1;
    }

    /// Push element unless an equal one has not been consumed yet
    ///
    /// Returns `true` if element was inserted.
    pub fn push_unique(&mut self, item: A::Item) -> bool
    where
        A::Item: PartialEq,
    {
        let present = (self.start..self.end).any(|index| self.array.at(index) == Some(&item));
        if !present {
            self.push(item);
        }
        !present
    }

    /// Number of uncosumed elements
    pub fn len(&self) -> usize {
        self.end - self.start
    }
}

impl<A: Array> Iterator for ArrayIter<A> {
    type Item = A::Item;

    fn next(&mut self) -> Option<Self::Item> {
        if self.start < self.end {
            let item = self.array.take(self.start);
            self.start += 1;
            item
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let size = self.end - self.start;
        (size, Some(size))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    #[macro_export]
    macro_rules! assert_approx_eq {
        ( $v0:expr, $v1: expr ) => {{
            assert!(($v0 - $v1).abs() < $crate::EPSILON, "{} != {}", $v0, $v1);
        }};
        ( $v0:expr, $v1: expr, $e: expr ) => {{
            assert!(($v0 - $v1).abs() < $e, "{} != {}", $v0, $v1);
        }};
    }

    #[test]
    fn test_array_iter() {
        let mut iter = ArrayIter::<[Option<u32>; 8]>::new();
        for value in 0..8 {
            iter.push(value);
        }
        assert_eq!(iter.len(), 8);
        assert_eq!(iter.size_hint(), (8, Some(8)));
        assert_eq!(iter.next(), Some(0));
        assert_eq!(iter.next(), Some(1));
        assert_eq!(iter.len(), 6);
        assert_eq!(format!("{:?}", iter), "[2, 3, 4, 5, 6, 7]");
        assert_eq!(iter.by_ref().count(), 6);
        assert_eq!(iter.next(), None);
    }

    #[test]
    fn test_array_iter_unique() {
        let mut iter = ArrayIter::<[Option<(i32, i32)>; 8]>::new();
        assert!(iter.push_unique((0, 5)));
        assert!(!iter.push_unique((0, 5)));
        assert!(iter.push_unique((5, 0)));
        assert_eq!(iter.len(), 2);
        assert_eq!(iter.collect::<Vec<_>>(), vec![(0, 5), (5, 0)]);
    }
}
