// ============================================================================
// RESOURCE LIST - Snapshot + filtro + paginación de una colección
// ============================================================================
// El filtro es una función pura sobre el último snapshot: nunca hace fetch.
// La página siempre está en [1, max(1, ceil(filtrados / page_size))].
// ============================================================================

/// Elementos que se pueden filtrar por una clave (estado, rol...)
pub trait Filterable {
    type Key: PartialEq + Copy;

    fn filter_key(&self) -> Self::Key;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListFilter<K> {
    #[default]
    All,
    Only(K),
}

impl<K: PartialEq> ListFilter<K> {
    pub fn matches(&self, key: &K) -> bool {
        match self {
            ListFilter::All => true,
            ListFilter::Only(wanted) => wanted == key,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ResourceList<T: Filterable> {
    snapshot: Vec<T>,
    filter: ListFilter<T::Key>,
    page: usize,
    page_size: usize,
    loaded: bool,
}

impl<T: Filterable> ResourceList<T> {
    pub fn new(page_size: usize) -> Self {
        Self {
            snapshot: Vec::new(),
            filter: ListFilter::All,
            page: 1,
            page_size: page_size.max(1),
            loaded: false,
        }
    }

    /// Reemplaza el snapshot con la respuesta del servidor (mismo orden)
    pub fn replace_snapshot(&mut self, items: Vec<T>) {
        self.snapshot = items;
        self.loaded = true;
        self.page = self.page.min(self.last_page());
    }

    pub fn snapshot(&self) -> &[T] {
        &self.snapshot
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn filter(&self) -> ListFilter<T::Key> {
        self.filter
    }

    /// Cambiar el filtro vuelve a la página 1 (solo si cambia)
    pub fn set_filter(&mut self, filter: ListFilter<T::Key>) {
        if self.filter != filter {
            self.filter = filter;
            self.page = 1;
        }
    }

    pub fn filtered_count(&self) -> usize {
        self.snapshot
            .iter()
            .filter(|item| self.filter.matches(&item.filter_key()))
            .count()
    }

    /// ceil(filtrados / page_size); 0 si no hay elementos
    pub fn total_pages(&self) -> usize {
        self.filtered_count().div_ceil(self.page_size)
    }

    fn last_page(&self) -> usize {
        self.total_pages().max(1)
    }

    pub fn current_page(&self) -> usize {
        self.page
    }

    /// Elementos de la página actual
    pub fn page_items(&self) -> Vec<&T> {
        let start = (self.page - 1) * self.page_size;
        self.snapshot
            .iter()
            .filter(|item| self.filter.matches(&item.filter_key()))
            .skip(start)
            .take(self.page_size)
            .collect()
    }

    /// Ir a una página. Fuera de rango no hace nada y devuelve false.
    pub fn go_to_page(&mut self, page: usize) -> bool {
        if page < 1 || page > self.last_page() {
            return false;
        }
        self.page = page;
        true
    }

    pub fn next_page(&mut self) -> bool {
        self.go_to_page(self.page + 1)
    }

    pub fn prev_page(&mut self) -> bool {
        self.page > 1 && self.go_to_page(self.page - 1)
    }

    pub fn reset_page(&mut self) {
        self.page = 1;
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages()
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Item {
        id: u32,
        even: bool,
    }

    impl Filterable for Item {
        type Key = bool;

        fn filter_key(&self) -> bool {
            self.even
        }
    }

    fn items(n: u32) -> Vec<Item> {
        (1..=n).map(|id| Item { id, even: id % 2 == 0 }).collect()
    }

    fn ids(list: &ResourceList<Item>) -> Vec<u32> {
        list.page_items().iter().map(|i| i.id).collect()
    }

    #[test]
    fn pages_never_exceed_page_size_and_cover_the_filtered_total() {
        for n in 0..=23 {
            for filter in [ListFilter::All, ListFilter::Only(true), ListFilter::Only(false)] {
                let mut list = ResourceList::new(5);
                list.replace_snapshot(items(n));
                list.set_filter(filter);

                let mut seen = 0;
                for page in 1..=list.total_pages() {
                    assert!(list.go_to_page(page));
                    let count = list.page_items().len();
                    assert!(count <= 5);
                    seen += count;
                }
                assert_eq!(seen, list.filtered_count());
            }
        }
    }

    #[test]
    fn out_of_range_page_is_a_no_op() {
        let mut list = ResourceList::new(5);
        list.replace_snapshot(items(12));
        assert_eq!(list.total_pages(), 3);
        assert!(list.go_to_page(3));
        assert!(!list.go_to_page(4));
        assert!(!list.go_to_page(0));
        assert_eq!(list.current_page(), 3);
        assert!(!list.next_page());
        assert_eq!(ids(&list), vec![11, 12]);
    }

    #[test]
    fn empty_list_stays_on_page_one() {
        let mut list: ResourceList<Item> = ResourceList::new(5);
        list.replace_snapshot(Vec::new());
        assert_eq!(list.total_pages(), 0);
        assert_eq!(list.current_page(), 1);
        assert!(list.go_to_page(1));
        assert!(!list.prev_page());
        assert!(list.page_items().is_empty());
    }

    #[test]
    fn changing_filter_resets_to_first_page() {
        let mut list = ResourceList::new(2);
        list.replace_snapshot(items(10));
        list.go_to_page(4);
        list.set_filter(ListFilter::Only(true));
        assert_eq!(list.current_page(), 1);
        assert_eq!(ids(&list), vec![2, 4]);
    }

    #[test]
    fn same_filter_keeps_page() {
        let mut list = ResourceList::new(2);
        list.replace_snapshot(items(10));
        list.go_to_page(3);
        list.set_filter(ListFilter::All);
        assert_eq!(list.current_page(), 3);
    }

    #[test]
    fn shrinking_snapshot_clamps_page() {
        let mut list = ResourceList::new(5);
        list.replace_snapshot(items(20));
        list.go_to_page(4);
        list.replace_snapshot(items(7));
        assert_eq!(list.current_page(), 2);
        assert_eq!(ids(&list), vec![6, 7]);
    }

    #[test]
    fn filtering_never_touches_snapshot_order() {
        let mut list = ResourceList::new(5);
        list.replace_snapshot(items(6));
        list.set_filter(ListFilter::Only(false));
        let snapshot: Vec<u32> = list.snapshot().iter().map(|i| i.id).collect();
        assert_eq!(snapshot, vec![1, 2, 3, 4, 5, 6]);
    }
}
