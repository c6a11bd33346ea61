use crate::geo::Pos;
use crate::interner::Desc;

/// Arena index of a node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) u32);

/// Arena index of a link.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct LinkId(pub(crate) u32);

/// Body-load state of a node.
///
/// Hollow nodes are placeholders: position known, body not yet decoded. The
/// state replaces the wire format's elevation sentinel; the wire still carries
/// a plain fixed-size elevation field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeState {
    Hollow,
    Loaded { selev: i16 },
}

/// A graph vertex at a fixed geographic position.
#[derive(Debug)]
pub struct Node {
    pub pos: Pos,
    pub state: NodeState,
    pub description: Option<Desc>,
    pub(crate) forward: Vec<LinkId>,
    pub(crate) pending_reverse: Vec<LinkId>,
}

impl Node {
    pub fn is_hollow(&self) -> bool {
        matches!(self.state, NodeState::Hollow)
    }

    /// Elevation in meters once the body is loaded; the wire unit is quarter meters.
    pub fn elev_meters(&self) -> Option<f64> {
        match self.state {
            NodeState::Hollow => None,
            NodeState::Loaded { selev } => Some(f64::from(selev) / 4.0),
        }
    }

    /// Outgoing links in decode order.
    pub fn forward_links(&self) -> &[LinkId] {
        &self.forward
    }

    /// Synthesized reverse links not yet claimed by their opposite endpoint.
    pub fn pending_reverse_links(&self) -> &[LinkId] {
        &self.pending_reverse
    }
}

/// Intermediate geometry point along a link, stored in origin→target order.
///
/// The description may be absent only on links whose counter link is written
/// explicitly elsewhere.
#[derive(Clone, Debug)]
pub struct ShapePoint {
    pub pos: Pos,
    pub selev: i16,
    pub description: Option<Desc>,
}

/// Directed link owned by its origin node.
#[derive(Debug)]
pub struct Link {
    pub target: NodeId,
    pub description: Option<Desc>,
    /// The opposite direction is stored explicitly elsewhere in the data; no
    /// mirror link is synthesized for this one.
    pub reverse_written: bool,
    pub shape: Vec<ShapePoint>,
    /// Claim tag on pending-reverse entries: the position of the node that
    /// will eventually own this link. `None` on ordinary forward links.
    pub origin_pos: Option<Pos>,
}

/// Arena of nodes and links.
///
/// Links are arena indices rather than references, so the node↔link↔node
/// cycles of the graph never become ownership cycles, and promoting a hollow
/// node keeps its identity.
#[derive(Debug, Default)]
pub struct Graph {
    pub(crate) nodes: Vec<Node>,
    pub(crate) links: Vec<Link>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_node(&mut self, pos: Pos, state: NodeState) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Node {
            pos,
            state,
            description: None,
            forward: Vec::new(),
            pending_reverse: Vec::new(),
        });
        id
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0 as usize]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0 as usize]
    }

    pub fn link(&self, id: LinkId) -> &Link {
        &self.links[id.0 as usize]
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub(crate) fn alloc_link(&mut self, link: Link) -> LinkId {
        let id = LinkId(self.links.len() as u32);
        self.links.push(link);
        id
    }

    /// Head-insert onto the forward list.
    pub fn add_forward(&mut self, node: NodeId, link: LinkId) {
        self.nodes[node.0 as usize].forward.insert(0, link);
    }

    /// Tail-append onto the forward list; body decode uses this to keep links
    /// in wire order.
    pub fn append_forward(&mut self, node: NodeId, link: LinkId) {
        self.nodes[node.0 as usize].forward.push(link);
    }

    /// Removes `link` from the forward list; a no-op when absent.
    pub fn unlink_forward(&mut self, node: NodeId, link: LinkId) {
        let list = &mut self.nodes[node.0 as usize].forward;
        if let Some(i) = list.iter().position(|&l| l == link) {
            list.remove(i);
        }
    }

    /// Head-insert onto the pending-reverse list.
    pub fn add_pending_reverse(&mut self, node: NodeId, link: LinkId) {
        self.nodes[node.0 as usize].pending_reverse.insert(0, link);
    }

    /// Removes `link` from the pending-reverse list; a no-op when absent.
    pub fn unlink_pending_reverse(&mut self, node: NodeId, link: LinkId) {
        let list = &mut self.nodes[node.0 as usize].pending_reverse;
        if let Some(i) = list.iter().position(|&l| l == link) {
            list.remove(i);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_link(graph: &mut Graph, target: NodeId) -> LinkId {
        graph.alloc_link(Link {
            target,
            description: None,
            reverse_written: false,
            shape: Vec::new(),
            origin_pos: None,
        })
    }

    #[test]
    fn append_keeps_order_and_head_insert_prepends() {
        let mut g = Graph::new();
        let n = g.add_node(Pos::new(0, 0), NodeState::Hollow);
        let t = g.add_node(Pos::new(1, 1), NodeState::Hollow);
        let a = empty_link(&mut g, t);
        let b = empty_link(&mut g, t);
        let c = empty_link(&mut g, t);
        g.append_forward(n, a);
        g.append_forward(n, b);
        g.add_forward(n, c);
        assert_eq!(g.node(n).forward_links(), &[c, a, b]);
    }

    #[test]
    fn unlink_removes_by_value_and_ignores_absent() {
        let mut g = Graph::new();
        let n = g.add_node(Pos::new(0, 0), NodeState::Hollow);
        let t = g.add_node(Pos::new(1, 1), NodeState::Hollow);
        let a = empty_link(&mut g, t);
        let b = empty_link(&mut g, t);
        let stray = empty_link(&mut g, t);
        g.append_forward(n, a);
        g.append_forward(n, b);

        g.unlink_forward(n, stray); // absent: no-op
        assert_eq!(g.node(n).forward_links(), &[a, b]);

        g.unlink_forward(n, a);
        assert_eq!(g.node(n).forward_links(), &[b]);
    }

    #[test]
    fn pending_reverse_unlink_mirrors_forward_semantics() {
        let mut g = Graph::new();
        let n = g.add_node(Pos::new(0, 0), NodeState::Hollow);
        let t = g.add_node(Pos::new(1, 1), NodeState::Hollow);
        let a = empty_link(&mut g, t);
        let b = empty_link(&mut g, t);
        g.add_pending_reverse(n, a);
        g.add_pending_reverse(n, b);
        assert_eq!(g.node(n).pending_reverse_links(), &[b, a]);

        g.unlink_pending_reverse(n, a);
        g.unlink_pending_reverse(n, a); // absent now: no-op
        assert_eq!(g.node(n).pending_reverse_links(), &[b]);
    }

    #[test]
    fn hollow_nodes_report_no_elevation() {
        let mut g = Graph::new();
        let n = g.add_node(Pos::new(0, 0), NodeState::Hollow);
        assert!(g.node(n).is_hollow());
        assert_eq!(g.node(n).elev_meters(), None);

        g.node_mut(n).state = NodeState::Loaded { selev: 402 };
        assert!(!g.node(n).is_hollow());
        assert_eq!(g.node(n).elev_meters(), Some(100.5));
    }
}
