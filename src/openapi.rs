//! Machine-readable description of the HTTP surface, served at
//! `/openapi.json` by both hosting shapes.

use serde_json::{json, Value};

pub fn document(base_url: &str) -> Value {
    json!({
        "openapi": "3.0.0",
        "info": {
            "title": "Bitcoin Positions API",
            "version": "1.0.0",
            "description": "CRUD API for managing Bitcoin trading positions.",
        },
        "servers": [{ "url": base_url }],
        "components": {
            "schemas": {
                "Position": {
                    "type": "object",
                    "properties": {
                        "id": { "type": "string", "example": "550e8400-e29b-41d4-a716-446655440000" },
                        "symbol": { "type": "string", "example": "BTCUSDT" },
                        "quantity": { "type": "number", "example": 0.5 },
                        "type": { "type": "string", "enum": ["buy", "sell"], "example": "buy" },
                        "entry": { "type": "number", "example": 30000 },
                        "date": { "type": "string", "format": "date-time", "example": "2025-10-25T10:00:00Z" },
                    },
                    "required": ["symbol", "quantity", "type", "date"],
                },
                "Health": {
                    "type": "object",
                    "properties": {
                        "status": { "type": "string", "example": "healthy" },
                        "timestamp": { "type": "string", "format": "date-time" },
                        "uptime": { "type": "number", "example": 123.45 },
                    },
                },
                "Error": {
                    "type": "object",
                    "properties": { "error": { "type": "string" } },
                },
            },
        },
        "paths": {
            "/positions": {
                "get": {
                    "summary": "List all positions",
                    "responses": {
                        "200": {
                            "description": "List of positions",
                            "content": { "application/json": { "schema": {
                                "type": "array",
                                "items": { "$ref": "#/components/schemas/Position" },
                            } } },
                        },
                        "500": { "description": "Server error", "content": { "application/json": { "schema": { "$ref": "#/components/schemas/Error" } } } },
                    },
                },
                "post": {
                    "summary": "Create a new position",
                    "requestBody": {
                        "required": true,
                        "content": { "application/json": { "schema": { "$ref": "#/components/schemas/Position" } } },
                    },
                    "responses": {
                        "201": { "description": "Position created", "content": { "application/json": { "schema": { "$ref": "#/components/schemas/Position" } } } },
                        "400": { "description": "Missing required fields", "content": { "application/json": { "schema": { "$ref": "#/components/schemas/Error" } } } },
                        "500": { "description": "Server error" },
                    },
                },
            },
            "/positions/{id}": {
                "parameters": [{
                    "name": "id",
                    "in": "path",
                    "required": true,
                    "schema": { "type": "string" },
                    "description": "Unique position ID",
                }],
                "get": {
                    "summary": "Get position by ID",
                    "responses": {
                        "200": { "description": "Position found", "content": { "application/json": { "schema": { "$ref": "#/components/schemas/Position" } } } },
                        "404": { "description": "Position not found" },
                        "500": { "description": "Server error" },
                    },
                },
                "put": {
                    "summary": "Update position by ID",
                    "requestBody": {
                        "required": true,
                        "content": { "application/json": { "schema": { "$ref": "#/components/schemas/Position" } } },
                    },
                    "responses": {
                        "200": { "description": "Position updated", "content": { "application/json": { "schema": { "$ref": "#/components/schemas/Position" } } } },
                        "400": { "description": "Missing required fields" },
                        "404": { "description": "Position not found" },
                        "500": { "description": "Server error" },
                    },
                },
                "delete": {
                    "summary": "Delete position by ID",
                    "responses": {
                        "200": {
                            "description": "Position deleted",
                            "content": { "application/json": { "schema": {
                                "type": "object",
                                "properties": { "deleted": { "type": "string" } },
                            } } },
                        },
                        "500": { "description": "Server error" },
                    },
                },
            },
            "/health": {
                "get": {
                    "summary": "Health check",
                    "responses": {
                        "200": { "description": "API is healthy", "content": { "application/json": { "schema": { "$ref": "#/components/schemas/Health" } } } },
                    },
                },
            },
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_carries_base_url_and_paths() {
        let doc = document("http://localhost:8080");
        assert_eq!(doc["servers"][0]["url"], "http://localhost:8080");
        assert!(doc["paths"]["/positions"]["post"].is_object());
        assert!(doc["paths"]["/positions/{id}"]["delete"].is_object());
    }
}
