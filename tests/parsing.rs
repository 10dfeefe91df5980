use rstest::rstest;
use serde_json::{json, Value};

use jsonapi_client::{
    parse_request_body, parse_response_body, Accessable, Error, FailurePolicy, Factory, Manager,
    Node, NodeKind, StoreValue,
};

fn get_str(document: &dyn Node, path: &str) -> String {
    document
        .get(path)
        .unwrap_or_else(|err| panic!("{path}: {err}"))
        .as_str()
        .unwrap_or_else(|| panic!("{path}: not a string"))
        .to_string()
}

#[rstest]
fn simple_resource() {
    let input = json!({
        "data": {
            "type": "articles",
            "id": "1",
            "attributes": {
                "title": "Rails is Omakase"
            },
            "relationships": {
                "author": {
                    "data": {"type": "people", "id": "9"}
                }
            }
        }
    });

    let document = parse_response_body(&input).unwrap();

    assert!(!document.has("errors"));
    assert!(!document.has("meta"));
    assert!(!document.has("jsonapi"));
    assert!(!document.has("links"));
    assert!(!document.has("included"));
    assert!(document.has("data"));

    let resource = document.get("data").unwrap().as_node().unwrap();
    assert_eq!(resource.kind(), NodeKind::ResourceItem);
    assert!(!resource.has("meta"));
    assert_eq!(get_str(resource, "type"), "articles");
    assert_eq!(get_str(resource, "id"), "1");
    assert!(resource.has("attributes"));
    assert!(resource.has("relationships"));

    assert_eq!(document.to_json(), input);
}

#[rstest]
fn simple_resource_identifier() {
    let input = json!({"data": {"type": "articles", "id": "1"}});

    let document = parse_response_body(&input).unwrap();

    assert_eq!(document.keys(), ["data"]);
    let resource = document.get("data").unwrap().as_node().unwrap();
    assert_eq!(resource.kind(), NodeKind::ResourceIdentifier);
    assert_eq!(get_str(resource, "type"), "articles");
    assert_eq!(get_str(resource, "id"), "1");

    assert_eq!(document.to_json(), input);
}

#[rstest]
fn resource_object_with_relationship_links() {
    let input = json!({
        "data": {
            "type": "articles",
            "id": "1",
            "meta": {"foo": "bar"},
            "attributes": {
                "title": "Rails is Omakase"
            },
            "relationships": {
                "author": {
                    "links": {
                        "self": "/articles/1/relationships/author",
                        "related": "/articles/1/author"
                    },
                    "data": {"type": "people", "id": "9"}
                }
            }
        }
    });

    let document = parse_response_body(&input).unwrap();

    let resource = document.get("data").unwrap().as_node().unwrap();
    assert_eq!(resource.kind(), NodeKind::ResourceItem);
    assert_eq!(get_str(resource, "meta.foo"), "bar");
    assert_eq!(get_str(resource, "attributes.title"), "Rails is Omakase");

    let author = document
        .get("data.relationships.author")
        .unwrap()
        .as_node()
        .unwrap();
    assert_eq!(author.kind(), NodeKind::Relationship);
    assert_eq!(get_str(author, "links.self"), "/articles/1/relationships/author");
    assert_eq!(get_str(author, "links.related"), "/articles/1/author");

    let author_data = author.get("data").unwrap().as_node().unwrap();
    assert_eq!(author_data.kind(), NodeKind::ResourceIdentifier);
    assert_eq!(get_str(author_data, "type"), "people");
    assert_eq!(get_str(author_data, "id"), "9");

    assert_eq!(document.to_json(), input);
}

#[rstest]
fn complete_document_with_multiple_relationships_and_included() {
    let input = json!({
        "data": [{
            "type": "articles",
            "id": "1",
            "attributes": {
                "title": "JSON API paints my bikeshed!"
            },
            "relationships": {
                "author": {
                    "links": {
                        "self": "http://example.com/articles/1/relationships/author",
                        "related": "http://example.com/articles/1/author"
                    },
                    "data": {"type": "people", "id": "9"}
                },
                "comments": {
                    "links": {
                        "self": "http://example.com/articles/1/relationships/comments",
                        "related": "http://example.com/articles/1/comments"
                    },
                    "data": [
                        {"type": "comments", "id": "5"},
                        {"type": "comments", "id": "12"}
                    ]
                }
            },
            "links": {
                "self": "http://example.com/articles/1"
            }
        }],
        "included": [{
            "type": "people",
            "id": "9",
            "attributes": {
                "first-name": "Dan",
                "last-name": "Gebhardt",
                "twitter": "dgeb"
            },
            "links": {
                "self": "http://example.com/people/9"
            }
        }, {
            "type": "comments",
            "id": "5",
            "attributes": {
                "body": "First!"
            },
            "links": {
                "self": "http://example.com/comments/5"
            }
        }, {
            "type": "comments",
            "id": "12",
            "attributes": {
                "body": "I like XML better"
            },
            "links": {
                "self": "http://example.com/comments/12"
            }
        }]
    });

    let document = parse_response_body(&input).unwrap();

    assert!(document.has("data"));
    assert!(document.has("included"));

    let resources = document.get("data").unwrap().as_node().unwrap();
    assert_eq!(resources.kind(), NodeKind::ResourceCollection);
    assert_eq!(resources.keys(), ["0"]);
    assert!(resources.has("0"));
    assert!(!resources.has("1"));

    let comments = document
        .get("data.0.relationships.comments.data")
        .unwrap()
        .as_node()
        .unwrap();
    assert_eq!(comments.kind(), NodeKind::ResourceIdentifierCollection);
    assert_eq!(comments.keys(), ["0", "1"]);
    assert_eq!(get_str(comments, "0.id"), "5");
    assert_eq!(get_str(comments, "1.id"), "12");

    let includes = document.get("included").unwrap().as_node().unwrap();
    assert_eq!(includes.kind(), NodeKind::ResourceCollection);
    assert_eq!(includes.keys(), ["0", "1", "2"]);
    assert_eq!(get_str(includes, "0.attributes.first-name"), "Dan");
    assert_eq!(get_str(includes, "2.attributes.body"), "I like XML better");

    assert_eq!(document.to_json(), input);
}

#[rstest]
fn pagination_links() {
    let input = json!({
        "meta": {
            "total-pages": 13
        },
        "data": [{
            "type": "articles",
            "id": "3",
            "attributes": {
                "title": "JSON API paints my bikeshed!",
                "body": "The shortest article. Ever.",
                "created": "2015-05-22T14:56:29.000Z",
                "updated": "2015-05-22T14:56:28.000Z"
            }
        }],
        "links": {
            "self": "http://example.com/articles?page[number]=3&page[size]=1",
            "first": "http://example.com/articles?page[number]=1&page[size]=1",
            "prev": "http://example.com/articles?page[number]=2&page[size]=1",
            "next": "http://example.com/articles?page[number]=4&page[size]=1",
            "last": "http://example.com/articles?page[number]=13&page[size]=1"
        }
    });

    let document = parse_response_body(&input).unwrap();

    assert!(document.has("meta"));
    assert!(document.has("links"));
    let links = document.get("links").unwrap().as_node().unwrap();
    assert_eq!(links.kind(), NodeKind::DocumentLink);
    for name in ["self", "first", "prev", "next", "last"] {
        assert!(links.has(name), "missing {name}");
    }
    assert_eq!(
        get_str(links, "last"),
        "http://example.com/articles?page[number]=13&page[size]=1"
    );
    assert_eq!(
        document.get("meta.total-pages").unwrap().as_i64(),
        Some(13)
    );

    assert_eq!(document.to_json(), input);
}

#[rstest]
fn relationship_with_pagination_and_object_link() {
    let input = json!({
        "data": [{
            "type": "articles",
            "id": "1",
            "attributes": {
                "title": "JSON API paints my bikeshed!"
            },
            "relationships": {
                "comments": {
                    "meta": {"foo": "bar"},
                    "links": {
                        "custom": "http://example.com/articles/1/custom",
                        "self": "http://example.com/articles/1/relationships/comments",
                        "first": "http://example.com/articles/1/comments?page=1",
                        "last": "http://example.com/articles/1/comments?page=10",
                        "prev": "http://example.com/articles/1/comments?page=1",
                        "next": "http://example.com/articles/1/comments?page=2",
                        "related": {
                            "href": "http://example.com/articles/1/comments",
                            "meta": {"count": 10}
                        }
                    }
                }
            }
        }]
    });

    let document = parse_response_body(&input).unwrap();

    assert!(document.has("data.0.relationships.comments"));
    assert!(document.has("data.0.relationships.comments.meta.foo"));
    assert_eq!(
        get_str(document.as_ref(), "data.0.relationships.comments.meta.foo"),
        "bar"
    );
    assert!(document.has("data.0.relationships.comments.links.custom"));
    assert!(document.has("data.0.relationships.comments.links.first"));

    let related = document
        .get("data.0.relationships.comments.links.related")
        .unwrap()
        .as_node()
        .unwrap();
    assert_eq!(related.kind(), NodeKind::Link);
    assert_eq!(
        get_str(related, "href"),
        "http://example.com/articles/1/comments"
    );
    assert_eq!(
        document
            .get("data.0.relationships.comments.links.related.meta.count")
            .unwrap()
            .as_i64(),
        Some(10)
    );

    // A relationship without `data` is valid as long as links or meta exist.
    assert!(!document.has("data.0.relationships.comments.data"));

    assert_eq!(document.to_json(), input);
}

#[rstest]
fn object_valued_document_links_and_jsonapi() {
    let input = json!({
        "meta": {"count": 10},
        "jsonapi": {
            "version": "1.0",
            "meta": {"foo": "bar"}
        },
        "links": {
            "self": {"href": "?page[number]=1&page[size]=10"},
            "first": {"href": "?page[number]=1&page[size]=10"},
            "next": {"href": "?page[number]=2&page[size]=10"},
            "last": {"href": "?page[number]=11&page[size]=10"}
        }
    });

    let document = parse_response_body(&input).unwrap();

    for path in ["links.self", "links.first", "links.next", "links.last"] {
        let link = document.get(path).unwrap().as_node().unwrap();
        assert_eq!(link.kind(), NodeKind::Link);
    }
    assert_eq!(
        get_str(document.as_ref(), "links.next.href"),
        "?page[number]=2&page[size]=10"
    );
    assert_eq!(get_str(document.as_ref(), "jsonapi.version"), "1.0");
    assert_eq!(get_str(document.as_ref(), "jsonapi.meta.foo"), "bar");

    assert_eq!(document.to_json(), input);
}

#[rstest]
fn resource_identifier_with_meta() {
    let input = json!({
        "data": {
            "type": "articles",
            "id": "2",
            "meta": {"foo": "bar"}
        }
    });

    let document = parse_response_body(&input).unwrap();

    let resource = document.get("data").unwrap().as_node().unwrap();
    assert_eq!(resource.kind(), NodeKind::ResourceIdentifier);
    assert_eq!(get_str(resource, "meta.foo"), "bar");

    assert_eq!(document.to_json(), input);
}

#[rstest]
fn null_primary_resource() {
    let input = json!({"data": null});

    let document = parse_response_body(&input).unwrap();

    assert!(document.has("data"));
    let resource = document.get("data").unwrap().as_node().unwrap();
    assert_eq!(resource.kind(), NodeKind::ResourceNull);
    assert!(!resource.has("type"));
    assert!(resource.keys().is_empty());

    assert_eq!(document.to_json(), input);
}

#[rstest]
fn identifier_collection_with_mixed_meta() {
    let input = json!({
        "data": [
            {"type": "articles", "id": "1"},
            {"type": "articles", "id": "2", "meta": {"foo": "bar"}}
        ]
    });

    let document = parse_response_body(&input).unwrap();

    let collection = document.get("data").unwrap().as_node().unwrap();
    assert_eq!(collection.kind(), NodeKind::ResourceCollection);
    assert_eq!(
        collection.get("0").unwrap().as_node().unwrap().kind(),
        NodeKind::ResourceIdentifier
    );
    assert!(!collection.has("0.meta"));
    assert_eq!(get_str(collection, "1.meta.foo"), "bar");

    assert_eq!(document.to_json(), input);
}

#[rstest]
fn creation_request_without_id() {
    let input = json!({
        "data": {
            "type": "photos",
            "attributes": {
                "title": "Ember Hamster",
                "src": "http://example.com/images/productivity.png"
            }
        }
    });

    let document = parse_request_body(&input).unwrap();

    assert_eq!(document.keys(), ["data"]);
    let resource = document.get("data").unwrap().as_node().unwrap();
    assert!(!resource.has("id"));
    assert_eq!(get_str(resource, "type"), "photos");

    assert_eq!(document.to_json(), input);
}

#[rstest]
fn creation_request_without_id_rejected_as_response() {
    let input = json!({
        "data": {
            "type": "photos",
            "attributes": {"title": "Ember Hamster"}
        }
    });

    let err = parse_response_body(&input).unwrap_err();
    assert!(matches!(&err, Error::Validation(message) if message.contains("MUST contain an id")));
}

#[rstest]
fn integer_type_and_id_are_coerced_to_strings() {
    let input = json!({"data": {"type": 1, "id": 789}});

    let document = parse_response_body(&input).unwrap();

    assert_eq!(get_str(document.as_ref(), "data.type"), "1");
    assert_eq!(get_str(document.as_ref(), "data.id"), "789");
    // The plain form carries the coerced strings, not the original numbers.
    assert_eq!(document.to_json(), json!({"data": {"type": "1", "id": "789"}}));
}

#[rstest]
fn error_document() {
    let input = json!({
        "errors": [{
            "id": "1",
            "status": "422",
            "code": "123",
            "title": "Invalid Attribute",
            "detail": "First name must contain at least three characters.",
            "links": {"about": "http://example.com/errors/422"},
            "source": {"pointer": "/data/attributes/first-name"},
            "meta": {"support": "yes"}
        }]
    });

    let document = parse_response_body(&input).unwrap();

    assert!(document.has("errors"));
    let errors = document.get("errors").unwrap().as_node().unwrap();
    assert_eq!(errors.kind(), NodeKind::ErrorCollection);
    assert_eq!(errors.keys(), ["0"]);
    assert_eq!(get_str(errors, "0.title"), "Invalid Attribute");
    assert_eq!(get_str(errors, "0.links.about"), "http://example.com/errors/422");
    assert_eq!(get_str(errors, "0.source.pointer"), "/data/attributes/first-name");
    assert_eq!(get_str(errors, "0.meta.support"), "yes");

    assert_eq!(document.to_json(), input);
}

#[rstest]
fn collect_policy_reports_every_malformed_error_element() {
    let input = json!({
        "errors": [
            {"title": "valid"},
            {"title": 42},
            "not an object",
            {"status": "500"}
        ]
    });

    let manager = Manager::new(Factory::default()).with_policy(FailurePolicy::Collect);
    let err = manager.parse(&input).unwrap_err();

    let failures = match err {
        Error::Collected(list) => list,
        other => panic!("expected collected failures, got: {other}"),
    };
    assert_eq!(failures.len(), 2);
    let positions: Vec<usize> = failures.iter().map(|(position, _)| position).collect();
    assert_eq!(positions, [1, 2]);
    let messages: Vec<&str> = failures.iter().map(|(_, message)| message).collect();
    assert!(messages[0].contains("property \"title\" has to be a string"));
    assert!(messages[1].contains("Error has to be an object"));
}

#[rstest]
fn abort_policy_stops_at_the_first_malformed_error_element() {
    let input = json!({
        "errors": [
            {"title": "valid"},
            {"title": 42},
            "not an object"
        ]
    });

    let err = parse_response_body(&input).unwrap_err();
    assert!(
        matches!(&err, Error::Validation(message) if message.contains("property \"title\" has to be a string"))
    );
}

#[rstest]
#[case(json!({"data": {"type": "a", "id": "1"}, "errors": []}), "MUST NOT coexist")]
#[case(json!({"links": {"self": "/"}}), "MUST contain at least one of the following properties")]
#[case(json!({"included": [], "meta": {}}), "`included` property MUST NOT be present")]
#[case(json!("a document"), "Document has to be an object, \"string\" given.")]
#[case(json!({"data": true}), "Data value has to be null, an object or an array")]
fn invalid_documents(#[case] input: Value, #[case] expected: &str) {
    let err = parse_response_body(&input).unwrap_err();
    let message = err.to_string();
    assert!(message.contains(expected), "unexpected message: {message}");
}

#[rstest]
#[case(json!({"errors": [{"title": "nope"}]}))]
#[case(json!({"meta": {"info": "no data"}}))]
fn request_body_requires_data(#[case] input: Value) {
    let err = parse_request_body(&input).unwrap_err();
    assert!(
        matches!(&err, Error::Validation(message) if message.contains("MUST contain a `data` property"))
    );
}

#[rstest]
fn collection_elements_must_be_objects() {
    let input = json!({"data": [{"type": "a", "id": "1"}, "rogue"]});

    let err = parse_response_body(&input).unwrap_err();
    assert!(matches!(
        &err,
        Error::Validation(message)
            if message.contains("Resources inside a collection MUST be objects, \"string\" given.")
    ));
}

#[rstest]
fn has_is_total_over_arbitrary_paths() {
    let input = json!({
        "data": {
            "type": "articles",
            "id": "1",
            "attributes": {"title": "x"}
        }
    });

    let document = parse_response_body(&input).unwrap();

    assert!(document.has("data.attributes.title"));
    assert!(!document.has(""));
    assert!(!document.has("nope"));
    assert!(!document.has("data..title"));
    // Descending through a raw scalar terminates with false, never an error.
    assert!(!document.has("data.attributes.title.length"));
    assert!(!document.has("data.id.0"));
}

#[rstest]
fn get_names_the_offending_key_and_innermost_context() {
    let input = json!({"data": {"type": "articles", "id": "1", "attributes": {"title": "x"}}});

    let document = parse_response_body(&input).unwrap();

    let err = document.get("something").unwrap_err();
    assert_eq!(
        err.to_string(),
        "\"something\" doesn't exist in this document."
    );

    let err = document.get("data.something").unwrap_err();
    assert_eq!(
        err.to_string(),
        "\"something\" doesn't exist in this resource."
    );
}

#[rstest]
fn parsed_graph_serializes_like_its_plain_form() {
    let input = json!({"data": {"type": "articles", "id": "1"}});

    let document = parse_response_body(&input).unwrap();
    let data = document.get("data").unwrap();
    assert_eq!(serde_json::to_value(data).unwrap(), input["data"]);

    let store_value: &StoreValue = document.get("data.id").unwrap();
    assert_eq!(serde_json::to_value(store_value).unwrap(), json!("1"));
}
