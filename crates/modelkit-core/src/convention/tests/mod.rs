
use crate::{
    builder::{
        BuildContext, EntityTypeBuilder, KeyBuilder, ModelBuilder, PropertyBuilder,
        RelationshipBuilder,
    },
    convention::{
        Convention, ConventionDispatcher, ConventionEvent, ConventionSet,
        EntityTypeAddedConvention,
    },
    error::{ErrorClass, ModelError},
    metadata::{EntityId, ForeignKey, Model, PropertyKind, owned_names},
    session::ModelSession,
    test_support::{Journal, Recorder, Step},
};
use std::sync::Arc;

fn recorders(steps: &[(&'static str, Step)], journal: &Journal) -> Vec<Arc<Recorder>> {
    steps
        .iter()
        .map(|(label, step)| Recorder::new(*label, *step, journal))
        .collect()
}

fn entity_added(steps: &[(&'static str, Step)], journal: &Journal) -> Arc<ConventionSet> {
    let set = recorders(steps, journal)
        .into_iter()
        .fold(ConventionSet::builder(), |b, r| b.entity_type_added(r))
        .build();

    Arc::new(set)
}

// Every event gets the same recorders, in the same order.
fn all_events(steps: &[(&'static str, Step)], journal: &Journal) -> Arc<ConventionSet> {
    let set = recorders(steps, journal)
        .into_iter()
        .fold(ConventionSet::builder(), |b, r| {
            b.entity_type_added(r.clone())
                .property_added(r.clone())
                .key_added(r.clone())
                .foreign_key_added(r.clone())
                .foreign_key_removed(r.clone())
                .model_initializing(r)
        })
        .build();

    Arc::new(set)
}

// Blog(Id) <- Post(Id, BlogId), with no foreign key yet.
fn seed_blog_and_post(model: &mut Model) -> (EntityId, EntityId) {
    let dispatcher = ConventionDispatcher::new(Arc::new(ConventionSet::empty()));
    let mut builder = ModelBuilder::new(BuildContext::new(model, &dispatcher));

    let mut blog = builder.entity("Blog").unwrap().unwrap();
    blog.property("Id", PropertyKind::Nat64).unwrap();
    blog.primary_key(&["Id"]).unwrap();
    let blog = blog.id();

    let mut post = builder.entity("Post").unwrap().unwrap();
    post.property("Id", PropertyKind::Nat64).unwrap();
    post.property("BlogId", PropertyKind::Nat64).unwrap();
    post.primary_key(&["Id"]).unwrap();

    (blog, post.id())
}

//
// mutating chains
//

#[test]
fn entity_chain_runs_in_registration_order() {
    let journal = Journal::new();
    let set = entity_added(
        &[("h0", Step::Pass), ("h1", Step::Pass), ("h2", Step::Pass)],
        &journal,
    );
    let mut session = ModelSession::new(set).unwrap();

    let id = session.builder().entity("Blog").unwrap().map(|b| b.id());

    assert!(id.is_some());
    assert_eq!(journal.entries(), vec!["h0", "h1", "h2"]);
}

#[test]
fn pass_through_returns_the_input_handle() {
    let journal = Journal::new();
    let dispatcher = ConventionDispatcher::new(entity_added(
        &[("h0", Step::Pass), ("h1", Step::Pass)],
        &journal,
    ));
    let mut model = Model::new();
    let id = model.add_entity_type("Blog");
    let before = model.clone();

    let returned = dispatcher
        .on_entity_type_added(EntityTypeBuilder::new(
            BuildContext::new(&mut model, &dispatcher),
            id,
        ))
        .unwrap()
        .map(|b| b.id());

    assert_eq!(returned, Some(id));
    assert_eq!(model, before);
}

#[test]
fn veto_stops_the_chain_and_returns_none() {
    let journal = Journal::new();
    let dispatcher = ConventionDispatcher::new(entity_added(
        &[("h0", Step::Pass), ("h1", Step::Veto), ("h2", Step::Pass)],
        &journal,
    ));
    let mut model = Model::new();
    let id = model.add_entity_type("Blog");

    let returned = dispatcher
        .on_entity_type_added(EntityTypeBuilder::new(
            BuildContext::new(&mut model, &dispatcher),
            id,
        ))
        .unwrap();

    assert!(returned.is_none());
    assert_eq!(journal.entries(), vec!["h0", "h1"]);
    // the dispatcher itself never undoes anything
    assert!(model.contains(id));
}

#[test]
fn builder_removes_a_vetoed_entity_type() {
    let journal = Journal::new();
    let set = entity_added(&[("h0", Step::Veto)], &journal);
    let mut session = ModelSession::new(set).unwrap();

    assert!(session.builder().entity("Blog").unwrap().is_none());
    assert!(session.model().entity_types().is_empty());
}

#[test]
fn handler_fault_propagates_unchanged() {
    let journal = Journal::new();
    let set = entity_added(
        &[("h0", Step::Pass), ("h1", Step::Fail), ("h2", Step::Pass)],
        &journal,
    );
    let mut session = ModelSession::new(set).unwrap();

    let err = session.builder().entity("Blog").err().expect("h1 should fail");

    assert_eq!(err, Recorder::fault("h1"));
    assert_eq!(journal.entries(), vec!["h0", "h1"]);
}

#[test]
fn empty_key_chain_returns_the_same_handle() {
    let dispatcher = ConventionDispatcher::new(Arc::new(ConventionSet::empty()));
    let mut model = Model::new();
    let (blog, _) = seed_blog_and_post(&mut model);

    let returned = dispatcher
        .on_key_added(KeyBuilder::new(
            BuildContext::new(&mut model, &dispatcher),
            blog,
            owned_names(&["Id"]),
        ))
        .unwrap()
        .map(|b| (b.entity_id(), b.properties().to_vec()));

    assert_eq!(returned, Some((blog, owned_names(&["Id"]))));
    assert_eq!(dispatcher.conventions().len(ConventionEvent::KeyAdded), 0);
}

#[test]
fn renamed_then_vetoed_entity_is_still_removed() {
    let journal = Journal::new();
    let set = entity_added(
        &[("rename", Step::Rename("_Temp2")), ("underscore", Step::VetoUnderscore)],
        &journal,
    );
    let mut session = ModelSession::new(set).unwrap();

    let added = session.builder().entity("_Temp").unwrap().is_some();

    assert!(!added);
    assert_eq!(journal.entries(), vec!["rename", "underscore"]);
    assert!(session.model().find_entity_type("_Temp2").is_none());
    assert!(session.model().entity_types().is_empty());
}

#[test]
fn underscore_rule_lets_other_names_through() {
    let journal = Journal::new();
    let set = entity_added(
        &[("rename", Step::Rename("Temp2")), ("underscore", Step::VetoUnderscore)],
        &journal,
    );
    let mut session = ModelSession::new(set).unwrap();

    assert!(session.builder().entity("Temp").unwrap().is_some());
    assert!(session.model().find_entity_type("Temp2").is_some());
}

///
/// RedirectTo
/// Substitutes the handle for another, already existing entity type.
///

struct RedirectTo(EntityId);

impl Convention for RedirectTo {
    fn name(&self) -> &'static str {
        "redirect"
    }
}

impl EntityTypeAddedConvention for RedirectTo {
    fn apply<'m>(
        &self,
        builder: EntityTypeBuilder<'m>,
    ) -> Result<Option<EntityTypeBuilder<'m>>, ModelError> {
        Ok(builder.into_model().into_entity(self.0))
    }
}

#[test]
fn substituted_handle_reaches_the_caller_and_later_handlers() {
    let journal = Journal::new();
    let mut model = Model::new();
    let (blog, _) = seed_blog_and_post(&mut model);

    let set = ConventionSet::builder()
        .entity_type_added(Arc::new(RedirectTo(blog)))
        .entity_type_added(Recorder::new("after", Step::Pass, &journal))
        .build();
    let dispatcher = ConventionDispatcher::new(Arc::new(set));
    let draft = model.add_entity_type("Draft");

    let returned = dispatcher
        .on_entity_type_added(EntityTypeBuilder::new(
            BuildContext::new(&mut model, &dispatcher),
            draft,
        ))
        .unwrap()
        .map(|b| b.id());

    assert_eq!(returned, Some(blog));
    assert_eq!(journal.entries(), vec!["after"]);
}

//
// notification chain
//

#[test]
fn removal_runs_every_handler_even_when_they_veto() {
    let journal = Journal::new();
    let set = recorders(
        &[("h0", Step::Veto), ("h1", Step::Pass), ("h2", Step::Veto)],
        &journal,
    )
    .into_iter()
    .fold(ConventionSet::builder(), |b, r| b.foreign_key_removed(r))
    .build();
    let mut session = ModelSession::new(Arc::new(set)).unwrap();
    {
        let mut builder = session.builder();
        let mut blog = builder.entity("Blog").unwrap().unwrap();
        blog.property("Id", PropertyKind::Nat64).unwrap();
        blog.primary_key(&["Id"]).unwrap();
        let mut post = builder.entity("Post").unwrap().unwrap();
        post.property("BlogId", PropertyKind::Nat64).unwrap();
        post.foreign_key("Blog", &["BlogId"]).unwrap().unwrap();

        let removed = post.remove_foreign_key(&["BlogId"]).unwrap();
        assert!(removed.is_some());
    }

    assert_eq!(journal.entries(), vec!["h0", "h1", "h2"]);
    let post = session.model().find_entity_type("Post").unwrap();
    assert!(post.foreign_keys().is_empty());
}

#[test]
fn removal_fault_propagates_and_stops() {
    let journal = Journal::new();
    let dispatcher = ConventionDispatcher::new(Arc::new(
        recorders(&[("h0", Step::Fail), ("h1", Step::Pass)], &journal)
            .into_iter()
            .fold(ConventionSet::builder(), |b, r| b.foreign_key_removed(r))
            .build(),
    ));
    let mut model = Model::new();
    let (blog, post) = seed_blog_and_post(&mut model);
    let foreign_key = ForeignKey::new(post, owned_names(&["BlogId"]), blog, owned_names(&["Id"]));

    let mut builder = EntityTypeBuilder::new(BuildContext::new(&mut model, &dispatcher), post);
    let err = dispatcher
        .on_foreign_key_removed(&mut builder, &foreign_key)
        .expect_err("h0 should fail");

    assert_eq!(err, Recorder::fault("h0"));
    assert_eq!(journal.entries(), vec!["h0"]);
}

#[test]
fn removal_rejects_a_foreign_key_from_another_entity() {
    let journal = Journal::new();
    let dispatcher = ConventionDispatcher::new(all_events(&[("h0", Step::Pass)], &journal));
    let mut model = Model::new();
    let (blog, post) = seed_blog_and_post(&mut model);
    let foreign_key = ForeignKey::new(post, owned_names(&["BlogId"]), blog, owned_names(&["Id"]));

    let mut builder = EntityTypeBuilder::new(BuildContext::new(&mut model, &dispatcher), blog);
    let err = dispatcher
        .on_foreign_key_removed(&mut builder, &foreign_key)
        .expect_err("mismatched entity should be rejected");

    assert!(err.is_invalid_argument());
    assert!(journal.entries().is_empty());
}

//
// preconditions
//

#[test]
fn detached_handles_are_rejected_before_any_handler_runs() {
    let journal = Journal::new();
    let dispatcher = ConventionDispatcher::new(all_events(&[("h0", Step::Pass)], &journal));
    let mut model = Model::new();
    let (blog, post) = seed_blog_and_post(&mut model);
    let gone = EntityId::new(99);

    let errors = [
        dispatcher
            .on_entity_type_added(EntityTypeBuilder::new(
                BuildContext::new(&mut model, &dispatcher),
                gone,
            ))
            .err(),
        dispatcher
            .on_property_added(PropertyBuilder::new(
                BuildContext::new(&mut model, &dispatcher),
                blog,
                "Missing",
            ))
            .err(),
        dispatcher
            .on_key_added(KeyBuilder::new(
                BuildContext::new(&mut model, &dispatcher),
                post,
                owned_names(&["BlogId"]),
            ))
            .err(),
        dispatcher
            .on_foreign_key_added(RelationshipBuilder::new(
                BuildContext::new(&mut model, &dispatcher),
                post,
                owned_names(&["BlogId"]),
            ))
            .err(),
        dispatcher
            .on_foreign_key_removed(
                &mut EntityTypeBuilder::new(BuildContext::new(&mut model, &dispatcher), gone),
                &ForeignKey::new(gone, owned_names(&["BlogId"]), blog, owned_names(&["Id"])),
            )
            .err(),
    ];

    for err in errors {
        let err = err.expect("detached handle should be rejected");
        assert_eq!(err.class, ErrorClass::InvalidArgument);
    }
    assert!(journal.entries().is_empty());
}

#[test]
fn vetoed_initialization_fails_the_session() {
    let journal = Journal::new();
    let set = all_events(&[("h0", Step::Veto), ("h1", Step::Pass)], &journal);

    let err = ModelSession::new(set).expect_err("initialization should be vetoed");

    assert_eq!(err.class, ErrorClass::Vetoed);
    assert_eq!(journal.entries(), vec!["h0"]);
}

#[test]
fn set_reports_names_per_event() {
    let journal = Journal::new();
    let set = all_events(&[("h0", Step::Pass), ("h1", Step::Pass)], &journal);

    for event in ConventionEvent::ALL {
        assert_eq!(set.names(event), vec!["h0", "h1"]);
        assert_eq!(set.len(event), 2);
    }
    assert!(!set.is_empty());

    let keys_only = ConventionSet::builder()
        .key_added(Recorder::new("h0", Step::Pass, &journal))
        .build();
    assert_eq!(keys_only.len(ConventionEvent::KeyAdded), 1);
    assert_eq!(keys_only.len(ConventionEvent::EntityTypeAdded), 0);
    assert!(!keys_only.is_empty());
    assert!(ConventionSet::empty().is_empty());
}
