use crate::Attribute;
use crate::Block;
use crate::Blocks;
use crate::Node;

pub const LOGIN_PAGE: &str = r#"doctype html
html(lang="en")
  head
    title _(Sign in)
  body
    //- form posts back to the same route
    form#login.card(method="post" action="/login")
      label(for="user") _(User name)
      input(id="user" name="user" placeholder="_(your name)")
      p.hint Welcome back, #{user}!
      button(type="submit")= submitLabel
"#;

/// `div(class=_(title))` with a buffered `name` expression as content.
pub fn title_div() -> Node {
	Node::Tag {
		name: "div".to_string(),
		attributes: vec![Attribute::new("class", "_(title)")],
		block: Some(Box::new(Node::block(vec![Node::code("name")]))),
	}
}

pub fn title_div_blocks() -> Blocks {
	Blocks::from(vec![
		Block::text("<div class="),
		Block::locale("_(\"title\")"),
		Block::text(">"),
		Block::variable("name"),
		Block::text("</div>"),
	])
}

/// A sequence with every kind of block and runs of adjacent text.
pub fn mixed_blocks() -> Blocks {
	Blocks::from(vec![
		Block::text("<p"),
		Block::text(">"),
		Block::text(""),
		Block::variable("greeting"),
		Block::text(", "),
		Block::locale("_(\"friend\")"),
		Block::locale("_(\"again\")"),
		Block::text("!"),
		Block::text("</p>"),
	])
}
